//! `format` lays down a fresh, empty filesystem on the disk named by
//! `$ZDISK`, creating the backing file if it does not already exist.

use std::env;

use vdfs::ops;
use vdfscli::{create_disk, die_on, usage};

fn main() {
    let prog = env::args().next().unwrap_or_else(|| "format".to_string());
    if env::args().count() != 1 {
        usage(&prog, "");
    }

    let mut disk = create_disk(&prog);
    if let Err(e) = ops::format(&mut disk) {
        die_on(&prog, e);
    }
}
