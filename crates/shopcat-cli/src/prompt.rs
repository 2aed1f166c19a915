use std::io::{self, BufRead, Write};

use shopcat_scraper::DEFAULT_PREVIEW_LIMIT;

#[must_use]
pub fn is_valid_store_url(url: &str, prefix: &str) -> bool {
    url.starts_with(prefix)
}

/// Reads one trimmed line, treating end of input as an error so callers
/// never loop on a closed stdin.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before a value was entered",
        ));
    }
    Ok(line.trim().to_owned())
}

/// Prompts until the entered URL starts with `prefix`.
pub fn read_store_url<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prefix: &str,
) -> io::Result<String> {
    loop {
        write!(output, "Enter the shop URL ({prefix}/...): ")?;
        output.flush()?;
        let url = read_line(input)?;
        if is_valid_store_url(&url, prefix) {
            return Ok(url);
        }
        writeln!(output, "Invalid URL. It must start with {prefix}")?;
    }
}

/// Parses a preview limit; anything that is not a positive integer gives
/// `None`.
#[must_use]
pub fn parse_preview_limit(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&n| n > 0)
}

/// Resolves the preview limit from a flag value or a prompt, falling back
/// to [`DEFAULT_PREVIEW_LIMIT`] with a notice.
pub fn resolve_preview_limit<R: BufRead, W: Write>(
    flag: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> io::Result<usize> {
    let raw = if let Some(raw) = flag {
        raw.to_owned()
    } else {
        write!(output, "How many products to preview per catalog? ")?;
        output.flush()?;
        read_line(input)?
    };
    if let Some(limit) = parse_preview_limit(&raw) {
        return Ok(limit);
    }
    writeln!(
        output,
        "Invalid number, using the default of {DEFAULT_PREVIEW_LIMIT}."
    )?;
    Ok(DEFAULT_PREVIEW_LIMIT)
}
