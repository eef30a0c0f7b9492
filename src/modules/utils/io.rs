use std::io::{self, BufRead, Write};

/// Read one line from `input` without its line terminator.
/// Returns `None` at end of input. Other whitespace is kept as typed.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Print a prompt without a newline and flush it
pub fn prompt<W: Write>(output: &mut W, text: &str) -> io::Result<()> {
    write!(output, "{}", text)?;
    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_only_terminator() {
        let mut input = Cursor::new("first\n  padded  \r\nlast");

        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("first"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("  padded  "));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_prompt_writes_without_newline() {
        let mut output = Vec::new();
        prompt(&mut output, "> ").unwrap();
        assert_eq!(output, b"> ");
    }
}
