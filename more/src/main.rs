//! `more` prints a file's entire contents to standard output, followed by
//! a trailing newline.

use std::env;
use std::io::{self, Write};

use vdfs::ops;
use vdfscli::{run, usage};

fn main() {
    let prog = env::args().next().unwrap_or_else(|| "more".to_string());
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        usage(&prog, "<path>");
    }

    run(&prog, |disk, cwd| {
        let contents = ops::more(disk, cwd, &args[0])?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        out.write_all(&contents).ok();
        out.write_all(b"\n").ok();
        Ok(())
    });
}
