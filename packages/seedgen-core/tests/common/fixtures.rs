//! Test fixture generators
//!
//! Firmware-style C sources and matching analysis manifests.

use std::path::Path;

/// UDP read handler with a null check, a flag test and a size bound
pub const UDP_READ_SOURCE: &str = r#"
#include "PxeBcImpl.h"

EFI_STATUS
EFIAPI
EfiPxeBcUdpRead (
  IN EFI_PXE_BASE_CODE_PROTOCOL  *This,
  IN UINT16                      OpFlags,
  IN OUT UINTN                   *BufferSize
  )
{
  if (This == NULL) {
    return EFI_INVALID_PARAMETER;
  }

  if ((OpFlags & 0x01) != 0) {
    Filter = TRUE;
  }

  if (BufferSize > 0x5DC) {
    return EFI_BUFFER_TOO_SMALL;
  }

  return EFI_SUCCESS;
}
"#;

/// Header declaring the same function (prototype only)
pub const UDP_READ_HEADER: &str = r#"
EFI_STATUS
EFIAPI
EfiPxeBcUdpRead (
  IN EFI_PXE_BASE_CODE_PROTOCOL  *This,
  IN UINT16                      OpFlags,
  IN OUT UINTN                   *BufferSize
  );
"#;

/// IPv4 pre-processing with two relational guards
pub const IP4_SOURCE: &str = r#"
EFI_STATUS
Ip4PreProcessPacket (IP4_SERVICE *IpSb, UINT32 BufferSize, UINT8 HeaderLength)
{
  if (BufferSize < 20) {
    return EFI_INVALID_PARAMETER;
  }
  if (HeaderLength >= 61) {
    return EFI_INVALID_PARAMETER;
  }
  return EFI_SUCCESS;
}
"#;

/// Manifest for both functions, including an OUT argument
pub const MANIFEST_JSON: &str = r#"[
  {
    "Function": "EfiPxeBcUdpRead",
    "Arguments": {
      "This": { "arg_type": "EFI_PXE_BASE_CODE_PROTOCOL *", "arg_dir": "IN", "variable": "This" },
      "OpFlags": { "arg_type": "UINT16", "arg_dir": "IN", "variable": "OpFlags" },
      "BufferSize": { "arg_type": "UINT32", "arg_dir": "IN", "variable": "BufferSize" },
      "Buffer": { "arg_type": "VOID *", "arg_dir": "OUT", "variable": "Buffer" }
    }
  },
  {
    "Function": "Ip4PreProcessPacket",
    "Arguments": {
      "IpSb": { "arg_type": "IP4_SERVICE *", "arg_dir": "IN", "variable": "IpSb" },
      "BufferSize": { "arg_type": "UINT32", "arg_dir": "IN", "variable": "BufferSize" },
      "HeaderLength": { "arg_type": "UINT8", "arg_dir": "IN", "variable": "HeaderLength" }
    }
  }
]"#;

/// Write `contents` to `dir/name`, creating parent directories
pub fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Source tree with a header prototype and both definitions
pub fn firmware_tree(dir: &Path) {
    write_file(dir, "Include/PxeBcImpl.h", UDP_READ_HEADER);
    write_file(dir, "PxeBcDxe/PxeBcImpl.c", UDP_READ_SOURCE);
    write_file(dir, "Ip4Dxe/Ip4Input.c", IP4_SOURCE);
    write_file(dir, "Ip4Dxe/README.md", "Ip4PreProcessPacket (docs) { if (x > 1) }");
}
