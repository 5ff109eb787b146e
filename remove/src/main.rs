//! `remove` unlinks a file, freeing its inode and data blocks once no
//! directory entry references it any longer.

use std::env;

use vdfs::ops;
use vdfscli::{run, usage};

fn main() {
    let prog = env::args().next().unwrap_or_else(|| "remove".to_string());
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        usage(&prog, "<path>");
    }

    run(&prog, |disk, cwd| ops::remove(disk, cwd, &args[0]));
}
