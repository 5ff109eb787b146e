//! Shared plumbing for the ten single-verb front ends: environment-variable
//! discovery of the backing disk and working directory, and the common
//! error-to-exit-code rendering. Mirrors the teacher's `utils` crate, which
//! plays the same role for `fdisk`/`mount`/`su` and friends.

use std::env;
use std::path::PathBuf;
use std::process::exit;

use vdfs::device::FileDisk;
use vdfs::layout::{InodeRef, ROOT_INODE};
use vdfs::path::resolve_from;
use vdfs::{Error, Result};

/// Name of the environment variable naming the backing disk image.
pub const ZDISK: &str = "ZDISK";
/// Name of the environment variable naming the current working directory.
pub const ZPWD: &str = "ZPWD";

/// The backing file path, from `$ZDISK` or `"vdisk1"`.
pub fn disk_path() -> PathBuf {
    env::var(ZDISK).unwrap_or_else(|_| "vdisk1".to_string()).into()
}

/// The working-directory path string, from `$ZPWD` or `"/"`.
pub fn pwd_path() -> String {
    env::var(ZPWD).unwrap_or_else(|_| "/".to_string())
}

/// Opens the existing backing file named by `$ZDISK`, or prints a message
/// and exits `1` if it cannot be opened.
pub fn open_disk(prog: &str) -> FileDisk {
    let path = disk_path();
    FileDisk::open(&path).unwrap_or_else(|e| {
        eprintln!("{prog}: cannot open '{}': {e}", path.display());
        exit(1);
    })
}

/// Creates (or truncates) the backing file named by `$ZDISK`, or prints a
/// message and exits `1` if it cannot be created. Used only by `format`.
pub fn create_disk(prog: &str) -> FileDisk {
    let path = disk_path();
    FileDisk::create(&path).unwrap_or_else(|e| {
        eprintln!("{prog}: cannot create '{}': {e}", path.display());
        exit(1);
    })
}

/// Resolves `$ZPWD` against the root directory to find the inode the
/// command's own path argument should be resolved relative to.
pub fn cwd_inode(dev: &mut dyn vdfs::BlockDevice) -> Result<InodeRef> {
    let pwd = pwd_path();
    let resolved = resolve_from(dev, ROOT_INODE, &pwd)?;
    if resolved.child == vdfs::layout::UNALLOCATED_INODE {
        return Err(Error::PathNotFound);
    }
    Ok(resolved.child)
}

/// Prints a `Usage: ...` line to stderr and exits `1`. Called when the
/// argument count doesn't match what the verb expects, before the disk is
/// touched at all.
pub fn usage(prog: &str, args: &str) -> ! {
    eprintln!("Usage: {prog} {args}");
    exit(1);
}

/// Renders an engine error as a one-line `stderr` message and exits `1`.
pub fn die_on(prog: &str, err: Error) -> ! {
    eprintln!("{prog}: {err}");
    exit(1);
}

/// Runs `body` with the open disk and the resolved cwd inode, exiting `1`
/// with a rendered message on any engine error. The common shape of every
/// verb's `main`.
pub fn run(prog: &str, body: impl FnOnce(&mut FileDisk, InodeRef) -> Result<()>) {
    let mut disk = open_disk(prog);
    let cwd = cwd_inode(&mut disk).unwrap_or_else(|e| die_on(prog, e));
    if let Err(e) = body(&mut disk, cwd) {
        die_on(prog, e);
    }
}
