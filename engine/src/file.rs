//! File handles: open/read/write/close over a resolved file inode.
//!
//! A handle only lives for the duration of one CLI operation — there is no
//! persistent open-file table, since every front end is a one-shot process.

use crate::device::BlockDevice;
use crate::directory::add_entry;
use crate::error::{Error, Result};
use crate::inode::{read_inode, write_inode, Inode, InodeType};
use crate::layout::{
    zeroed_block, BlockRef, InodeRef, BLOCKS_PER_INODE, BLOCK_SIZE, UNALLOCATED_BLOCK,
};
use crate::master::{allocate_block, allocate_inode, deallocate_block, deallocate_inode};
use crate::path::resolve_from;

/// The three modes `open` accepts, mirroring the C library's `'r'`, `'w'`
/// and `'a'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    Write,
    Append,
}

impl OpenMode {
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'r' => Ok(OpenMode::Read),
            'w' => Ok(OpenMode::Write),
            'a' => Ok(OpenMode::Append),
            _ => Err(Error::BadMode),
        }
    }
}

/// A handle to an open file: which inode, which mode, and the current
/// read/write cursor.
pub struct FileHandle {
    pub inode_reference: InodeRef,
    mode: OpenMode,
    offset: u32,
}

/// Opens `path` (resolved relative to `cwd`) for `mode`.
///
/// `Write` and `Append` create the file if it does not exist, rolling back
/// the freshly allocated inode if the parent directory has no room for the
/// new entry. `Write` truncates an existing file back to empty before
/// positioning the cursor at the start; `Append` positions it at the end.
/// `Read` requires the file to already exist.
pub fn open(dev: &mut dyn BlockDevice, cwd: InodeRef, path: &str, mode: OpenMode) -> Result<FileHandle> {
    let resolved = resolve_from(dev, cwd, path)?;

    let inode_reference = if resolved.child != crate::layout::UNALLOCATED_INODE {
        let inode = read_inode(dev, resolved.child)?;
        if inode.kind != InodeType::File {
            return Err(Error::NotAFile);
        }
        if mode == OpenMode::Write {
            truncate_file(dev, resolved.child, inode)?;
        }
        resolved.child
    } else {
        if mode == OpenMode::Read {
            return Err(Error::PathNotFound);
        }
        create_file(dev, resolved.parent, &resolved.name)?
    };

    let offset = match mode {
        OpenMode::Read | OpenMode::Write => 0,
        OpenMode::Append => read_inode(dev, inode_reference)?.size,
    };

    Ok(FileHandle {
        inode_reference,
        mode,
        offset,
    })
}

/// Frees every data block an existing FILE inode references and resets its
/// size back to zero, without touching its reference count or directory
/// entry. Used by `open(..., Write)` to truncate in place.
fn truncate_file(dev: &mut dyn BlockDevice, inode_reference: InodeRef, mut inode: Inode) -> Result<()> {
    for block_ref in inode.data {
        if block_ref != UNALLOCATED_BLOCK {
            deallocate_block(dev, block_ref)?;
        }
    }
    inode.data = [UNALLOCATED_BLOCK; BLOCKS_PER_INODE];
    inode.size = 0;
    write_inode(dev, inode_reference, &inode)
}

fn create_file(dev: &mut dyn BlockDevice, parent: InodeRef, name: &str) -> Result<InodeRef> {
    if name.len() > crate::directory::MAX_NAME_LEN {
        return Err(Error::NameTooLong);
    }

    let new_inode_ref = allocate_inode(dev)?;
    if new_inode_ref == crate::layout::UNALLOCATED_INODE {
        return Err(Error::NoInodes);
    }

    let mut file = Inode::cleared();
    file.kind = InodeType::File;
    file.n_references = 1;
    write_inode(dev, new_inode_ref, &file)?;

    if let Err(e) = add_entry(dev, parent, name, new_inode_ref) {
        deallocate_inode(dev, new_inode_ref)?;
        return Err(e);
    }

    Ok(new_inode_ref)
}

/// Closes `fp`. There is no open-file table to release anything from; this
/// exists only so callers can bracket `open`/`close` the way the original
/// library did.
pub fn close(_fp: FileHandle) -> Result<()> {
    Ok(())
}

/// Writes `data` starting at the handle's cursor, allocating data blocks
/// lazily and stopping (without erroring) once either `data` is exhausted,
/// `BLOCKS_PER_INODE` direct blocks are full, or the block bitmap runs out.
/// Returns the number of bytes actually written.
pub fn write(dev: &mut dyn BlockDevice, fp: &mut FileHandle, data: &[u8]) -> Result<usize> {
    if fp.mode == OpenMode::Read {
        return Err(Error::InvalidHandle);
    }

    let mut inode = read_inode(dev, fp.inode_reference)?;
    let mut written = 0usize;

    while written < data.len() {
        let block_index = (fp.offset as usize) / BLOCK_SIZE;
        if block_index >= BLOCKS_PER_INODE {
            break;
        }
        let block_offset = (fp.offset as usize) % BLOCK_SIZE;

        if inode.data[block_index] == UNALLOCATED_BLOCK {
            let new_block = allocate_block(dev)?;
            if new_block == UNALLOCATED_BLOCK {
                break;
            }
            dev.write_block(new_block, &zeroed_block())?;
            inode.data[block_index] = new_block;
        }

        let block_ref: BlockRef = inode.data[block_index];
        let mut block = zeroed_block();
        dev.read_block(block_ref, &mut block)?;

        let space_left = BLOCK_SIZE - block_offset;
        let remaining = data.len() - written;
        let copy_amount = space_left.min(remaining);

        block[block_offset..block_offset + copy_amount]
            .copy_from_slice(&data[written..written + copy_amount]);
        dev.write_block(block_ref, &block)?;

        written += copy_amount;
        fp.offset += copy_amount as u32;
    }

    if fp.offset > inode.size {
        inode.size = fp.offset;
    }
    write_inode(dev, fp.inode_reference, &inode)?;

    Ok(written)
}

/// Reads up to `buf.len()` bytes starting at the handle's cursor. Returns
/// the number of bytes actually read, which is less than `buf.len()` only
/// at end of file.
pub fn read(dev: &mut dyn BlockDevice, fp: &mut FileHandle, buf: &mut [u8]) -> Result<usize> {
    if fp.mode != OpenMode::Read {
        return Err(Error::InvalidHandle);
    }

    let inode = read_inode(dev, fp.inode_reference)?;
    let available = inode.size.saturating_sub(fp.offset) as usize;
    let to_read = buf.len().min(available);

    let mut done = 0usize;
    while done < to_read {
        let block_index = (fp.offset as usize) / BLOCK_SIZE;
        let block_offset = (fp.offset as usize) % BLOCK_SIZE;
        let block_ref = inode.data[block_index];
        if block_ref == UNALLOCATED_BLOCK {
            break;
        }

        let mut block = zeroed_block();
        dev.read_block(block_ref, &mut block)?;

        let space_left = BLOCK_SIZE - block_offset;
        let remaining = to_read - done;
        let copy_amount = space_left.min(remaining);

        buf[done..done + copy_amount].copy_from_slice(&block[block_offset..block_offset + copy_amount]);

        done += copy_amount;
        fp.offset += copy_amount as u32;
    }

    Ok(done)
}
