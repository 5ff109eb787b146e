//! Block device abstraction and its two implementations.

use crate::error::{Error, Result};
use crate::layout::{Block, BlockRef, BLOCK_SIZE, N_BLOCKS};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// A fixed-size random-access store of `N_BLOCKS` blocks of `BLOCK_SIZE`
/// bytes each. Every on-disk read or write in the engine goes through this
/// trait; there is no write-back cache above it.
pub trait BlockDevice {
    /// Reads block `r` into `buf`.
    fn read_block(&mut self, r: BlockRef, buf: &mut Block) -> Result<()>;
    /// Writes `buf` into block `r`.
    fn write_block(&mut self, r: BlockRef, buf: &Block) -> Result<()>;
}

/// A virtual disk backed by a plain file.
pub struct FileDisk {
    file: File,
}

impl FileDisk {
    /// Opens an existing backing file. Fails if it is shorter than the
    /// full disk image; every front end but `format` uses this.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self { file })
    }

    /// Creates (or truncates) the backing file and sizes it to exactly
    /// `N_BLOCKS * BLOCK_SIZE` bytes. Used by the `format` front end.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len((N_BLOCKS * BLOCK_SIZE) as u64)?;
        Ok(Self { file })
    }

    fn offset_of(r: BlockRef) -> u64 {
        r as u64 * BLOCK_SIZE as u64
    }
}

impl BlockDevice for FileDisk {
    fn read_block(&mut self, r: BlockRef, buf: &mut Block) -> Result<()> {
        self.file.seek(SeekFrom::Start(Self::offset_of(r)))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    fn write_block(&mut self, r: BlockRef, buf: &Block) -> Result<()> {
        self.file.seek(SeekFrom::Start(Self::offset_of(r)))?;
        self.file.write_all(buf)?;
        Ok(())
    }
}

/// An in-memory virtual disk, used by the test suite to avoid touching the
/// filesystem.
pub struct MemDisk {
    blocks: Vec<Block>,
}

impl MemDisk {
    /// Creates a zeroed disk of `N_BLOCKS` blocks.
    pub fn new() -> Self {
        Self {
            blocks: vec![crate::layout::zeroed_block(); N_BLOCKS],
        }
    }
}

impl Default for MemDisk {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDevice for MemDisk {
    fn read_block(&mut self, r: BlockRef, buf: &mut Block) -> Result<()> {
        let idx = r as usize;
        if idx >= self.blocks.len() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "block index out of range",
            )));
        }
        buf.copy_from_slice(&self.blocks[idx]);
        Ok(())
    }

    fn write_block(&mut self, r: BlockRef, buf: &Block) -> Result<()> {
        let idx = r as usize;
        if idx >= self.blocks.len() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "block index out of range",
            )));
        }
        self.blocks[idx].copy_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_disk_round_trips() {
        let mut disk = MemDisk::new();
        let mut block = crate::layout::zeroed_block();
        block[0] = 0x42;
        disk.write_block(3, &block).unwrap();

        let mut read_back = crate::layout::zeroed_block();
        disk.read_block(3, &mut read_back).unwrap();
        assert_eq!(read_back, block);

        let mut other = crate::layout::zeroed_block();
        disk.read_block(4, &mut other).unwrap();
        assert_eq!(other, crate::layout::zeroed_block());
    }
}
