//! User interaction operations (confirmation prompts).

use anyhow::Result;

use super::RealRuntime;

use std::io::{self, BufRead, Write};

/// Answers taken as "yes": English "y" and German "j".
pub const ACCEPTED_ANSWERS: &[&str] = &["y", "j"];

/// Core, testable implementation that reads from any BufRead and writes to any Write.
pub(crate) fn confirm_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(ACCEPTED_ANSWERS.contains(&line.trim_end_matches(['\r', '\n'])))
}

impl RealRuntime {
    pub(crate) fn confirm_impl(&self, prompt: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        confirm_with_io(prompt, &mut stdin_lock, &mut stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::confirm_with_io;
    use anyhow::Result;
    use std::io::Cursor;

    #[test]
    fn confirms_y_and_j() -> Result<()> {
        let cases = vec!["y\n", "j\n", "y\r\n", "j"];
        for case in cases {
            let mut input = Cursor::new(case.as_bytes());
            let mut output = Vec::new();
            let ok = confirm_with_io("Merge?", &mut input, &mut output)?;
            assert!(ok, "expected '{}' to be accepted as yes", case);
        }
        Ok(())
    }

    #[test]
    fn rejects_everything_else() -> Result<()> {
        // Only the exact short answers count
        let cases = vec![
            "n\n", "yes\n", "ja\n", "Y\n", "J\n", "\n", "", "other\n", "  y  \n", "j \n",
        ];
        for case in cases {
            let mut input = Cursor::new(case.as_bytes());
            let mut output = Vec::new();
            let ok = confirm_with_io("Merge?", &mut input, &mut output)?;
            assert!(!ok, "expected '{}' to be rejected as no", case);
        }
        Ok(())
    }

    #[test]
    fn prompt_is_written_before_reading() -> Result<()> {
        let mut input = Cursor::new(b"n\n");
        let mut output = Vec::new();
        let _ = confirm_with_io("Do you want to merge these packages?", &mut input, &mut output)?;
        let out = String::from_utf8(output)?;
        assert_eq!(out, "Do you want to merge these packages? [y/N] ");
        Ok(())
    }
}
