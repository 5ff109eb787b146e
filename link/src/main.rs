//! `link` adds a new directory entry pointing at an existing file's inode,
//! bumping its reference count.

use std::env;

use vdfs::ops;
use vdfscli::{run, usage};

fn main() {
    let prog = env::args().next().unwrap_or_else(|| "link".to_string());
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 2 {
        usage(&prog, "<source> <dest>");
    }

    run(&prog, |disk, cwd| ops::link(disk, cwd, &args[0], &args[1]));
}
