//! The operations behind each CLI front end: format, mkdir, rmdir, list,
//! touch, create, append, more, remove and link.

use crate::device::BlockDevice;
use crate::directory::{add_entry, drop_entry, read_entries, DirectoryEntry, MAX_NAME_LEN};
use crate::error::{Error, Result};
use crate::file::{self, OpenMode};
use crate::inode::{read_inode, write_inode, Inode, InodeType};
use crate::layout::{
    zeroed_block, InodeRef, BLOCK_SIZE, MASTER_BLOCK_REFERENCE, MAX_PATH_LENGTH, N_BLOCKS,
    ROOT_DIRECTORY_BLOCK, ROOT_INODE, UNALLOCATED_BLOCK, UNALLOCATED_INODE,
};
use crate::master::{allocate_block, allocate_inode, deallocate_block, deallocate_inode, mark_block_allocated, mark_inode_allocated};
use crate::path::resolve_from;

fn check_path_length(path: &str) -> Result<()> {
    if path.len() > MAX_PATH_LENGTH {
        Err(Error::PathTooLong)
    } else {
        Ok(())
    }
}

fn check_name_length(name: &str) -> Result<()> {
    if name.len() > MAX_NAME_LEN {
        Err(Error::NameTooLong)
    } else {
        Ok(())
    }
}

/// Lays down a fresh, empty filesystem: zeroes every block, reserves the
/// master block, the inode table and the root directory's data block, and
/// writes the root directory inode and its `.`/`..` entries.
pub fn format(dev: &mut dyn BlockDevice) -> Result<()> {
    let empty = zeroed_block();
    for r in 0..N_BLOCKS as u8 {
        dev.write_block(r, &empty)?;
    }

    for r in MASTER_BLOCK_REFERENCE..=ROOT_DIRECTORY_BLOCK {
        mark_block_allocated(dev, r)?;
    }
    mark_inode_allocated(dev, ROOT_INODE)?;

    let mut root = Inode::cleared();
    root.kind = InodeType::Directory;
    root.n_references = 1;
    root.data[0] = ROOT_DIRECTORY_BLOCK;
    root.size = 2;
    write_inode(dev, ROOT_INODE, &root)?;

    crate::directory::clean_directory_block(dev, ROOT_DIRECTORY_BLOCK, ROOT_INODE, ROOT_INODE)
}

/// Creates a new, empty directory at `path`.
pub fn mkdir(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str) -> Result<()> {
    check_path_length(path)?;
    let resolved = resolve_from(dev, cwd, path)?;
    check_name_length(&resolved.name)?;
    if resolved.child != UNALLOCATED_INODE {
        return Err(Error::AlreadyExists);
    }

    let new_inode_ref = allocate_inode(dev)?;
    if new_inode_ref == UNALLOCATED_INODE {
        return Err(Error::NoInodes);
    }

    let new_block_ref = match allocate_block(dev)? {
        UNALLOCATED_BLOCK => {
            deallocate_inode(dev, new_inode_ref)?;
            return Err(Error::NoBlocks);
        }
        r => r,
    };

    let mut dir = Inode::cleared();
    dir.kind = InodeType::Directory;
    dir.n_references = 1;
    dir.data[0] = new_block_ref;
    dir.size = 2;
    write_inode(dev, new_inode_ref, &dir)?;
    crate::directory::clean_directory_block(dev, new_block_ref, new_inode_ref, resolved.parent)?;

    if let Err(e) = add_entry(dev, resolved.parent, &resolved.name, new_inode_ref) {
        deallocate_block(dev, new_block_ref)?;
        deallocate_inode(dev, new_inode_ref)?;
        return Err(e);
    }

    Ok(())
}

/// Removes the empty directory at `path`. Fails with `NotEmpty` if it holds
/// anything beyond `.` and `..`, and refuses to touch `.`, `..` or `/`.
pub fn rmdir(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str) -> Result<()> {
    check_path_length(path)?;
    let resolved = resolve_from(dev, cwd, path)?;
    if resolved.name == "." || resolved.name == ".." {
        return Err(Error::ReservedName);
    }
    if resolved.child == UNALLOCATED_INODE {
        return Err(Error::PathNotFound);
    }

    let child = read_inode(dev, resolved.child)?;
    if child.kind != InodeType::Directory {
        return Err(Error::NotADirectory);
    }

    let live = read_entries(dev, child.data[0])?
        .into_iter()
        .filter(|e| e.is_valid())
        .count();
    if live > 2 {
        return Err(Error::NotEmpty);
    }

    dev.write_block(child.data[0], &zeroed_block())?;
    deallocate_block(dev, child.data[0])?;
    write_inode(dev, resolved.child, &Inode::cleared())?;
    deallocate_inode(dev, resolved.child)?;
    drop_entry(dev, resolved.parent, &resolved.name)
}

/// What `list` found at the resolved path: either the single name of a
/// plain file, or a directory's full entry set (including `.` and `..`),
/// sorted byte-wise ascending by name.
pub enum Listing {
    File(String),
    Directory(Vec<DirectoryEntry>),
}

/// Describes the target at `path`: its own name if it is a plain file, or
/// its sorted entries (including `.` and `..`) if it is a directory.
pub fn list(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str) -> Result<Listing> {
    check_path_length(path)?;
    let resolved = resolve_from(dev, cwd, path)?;
    if resolved.child == UNALLOCATED_INODE {
        return Err(Error::PathNotFound);
    }

    let inode = read_inode(dev, resolved.child)?;
    match inode.kind {
        InodeType::Directory => {
            let mut entries: Vec<DirectoryEntry> = read_entries(dev, inode.data[0])?
                .into_iter()
                .filter(|e| e.is_valid())
                .collect();
            entries.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(Listing::Directory(entries))
        }
        InodeType::File => Ok(Listing::File(resolved.name)),
        InodeType::None => Err(Error::PathNotFound),
    }
}

/// Creates an empty file at `path` if it does not already exist; leaves its
/// contents untouched if it does, as long as it is a plain file.
pub fn touch(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str) -> Result<()> {
    check_path_length(path)?;
    let fp = file::open(dev, cwd, path, OpenMode::Append)?;
    file::close(fp)
}

/// Creates the file at `path`, truncating it back to empty first if it
/// already exists as a plain file, then writes `data` into it. Returns the
/// number of bytes actually written (less than `data.len()` only once the
/// file's direct blocks or the block bitmap are exhausted).
pub fn create(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str, data: &[u8]) -> Result<usize> {
    check_path_length(path)?;
    let mut fp = file::open(dev, cwd, path, OpenMode::Write)?;
    let n = file::write(dev, &mut fp, data)?;
    file::close(fp)?;
    Ok(n)
}

/// Appends `data` to the file at `path`, creating it first if necessary.
/// Returns the number of bytes actually written (less than `data.len()`
/// only once the file's direct blocks or the block bitmap are exhausted).
pub fn append(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str, data: &[u8]) -> Result<usize> {
    check_path_length(path)?;
    let mut fp = file::open(dev, cwd, path, OpenMode::Append)?;
    let n = file::write(dev, &mut fp, data)?;
    file::close(fp)?;
    Ok(n)
}

/// Reads the whole contents of the file at `path`.
pub fn more(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str) -> Result<Vec<u8>> {
    check_path_length(path)?;
    let mut fp = file::open(dev, cwd, path, OpenMode::Read)?;
    let mut out = Vec::new();
    let mut chunk = [0u8; BLOCK_SIZE];
    loop {
        let n = file::read(dev, &mut fp, &mut chunk)?;
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
    }
    file::close(fp)?;
    Ok(out)
}

/// Unlinks `path` from its parent directory, dropping the target file's
/// reference count and freeing its inode and data blocks once that count
/// reaches zero. The directory entry is always removed, whether or not
/// this was the last reference.
pub fn remove(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str) -> Result<()> {
    check_path_length(path)?;
    let resolved = resolve_from(dev, cwd, path)?;
    if resolved.name == "." || resolved.name == ".." {
        return Err(Error::ReservedName);
    }
    if resolved.child == UNALLOCATED_INODE {
        return Err(Error::PathNotFound);
    }

    let mut child = read_inode(dev, resolved.child)?;
    if child.kind != InodeType::File {
        return Err(Error::NotAFile);
    }

    child.n_references = child.n_references.saturating_sub(1);
    if child.n_references == 0 {
        for &block_ref in child.data.iter().filter(|&&b| b != UNALLOCATED_BLOCK) {
            deallocate_block(dev, block_ref)?;
        }
        write_inode(dev, resolved.child, &Inode::cleared())?;
        deallocate_inode(dev, resolved.child)?;
    } else {
        write_inode(dev, resolved.child, &child)?;
    }

    drop_entry(dev, resolved.parent, &resolved.name)
}

/// Creates a new directory entry at `dest` that refers to the same file
/// inode as `source`, bumping its reference count. Both paths are resolved
/// relative to `cwd`.
pub fn link(dev: &mut dyn BlockDevice, cwd: InodeRef, source: &str, dest: &str) -> Result<()> {
    check_path_length(source)?;
    check_path_length(dest)?;

    let source_resolved = resolve_from(dev, cwd, source)?;
    if source_resolved.child == UNALLOCATED_INODE {
        return Err(Error::PathNotFound);
    }
    let mut source_inode = read_inode(dev, source_resolved.child)?;
    if source_inode.kind != InodeType::File {
        return Err(Error::NotAFile);
    }

    let dest_resolved = resolve_from(dev, cwd, dest)?;
    check_name_length(&dest_resolved.name)?;
    if dest_resolved.child != UNALLOCATED_INODE {
        return Err(Error::AlreadyExists);
    }

    add_entry(dev, dest_resolved.parent, &dest_resolved.name, source_resolved.child)?;
    source_inode.n_references += 1;
    write_inode(dev, source_resolved.child, &source_inode)
}
