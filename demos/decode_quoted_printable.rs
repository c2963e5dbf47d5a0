use std::env;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Write};

use qpstream::encoding::quoted_printable::QuotedPrintableReader;

const SAMPLE_BODY: &str = "\
=54=68=69=73=20=69=73=20=6a=75=73=74=20=73=61=6d=70=6c=65=20=74=65=78=74=\r\n\
=20=62=75=74=20=71=75=6f=74=65=64=2d=70=72=69=6e=74=61=62=6c=65=20=65=6e=\r\n\
=63=6f=64=65=64   \r\n\
Caf=C3=A9, na=C3=AFve =3D ok\r\n\
";

fn main() -> Result<(), io::Error> {
    // With no arguments sample body is decoded, otherwise given file is. `-` means stdin.
    let source: Box<dyn Read> = match env::args().nth(1) {
        None => {
            println!("Decoding sample body:");
            println!("---\n{}---", SAMPLE_BODY);
            Box::new(Cursor::new(SAMPLE_BODY.as_bytes()))
        }
        Some(ref path) if path == "-" => Box::new(BufReader::new(io::stdin())),
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
    };

    let mut r = QuotedPrintableReader::new(source);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    io::copy(&mut r, &mut out)?;
    out.flush()
}
