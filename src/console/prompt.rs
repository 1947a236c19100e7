//! Line-oriented input with navigation keywords.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

/// Navigation requested at a prompt, or a broken terminal.
#[derive(Debug, thiserror::Error)]
pub enum Interrupt {
    #[error("back")]
    Back,
    #[error("reset")]
    Reset,
    #[error("quit")]
    Quit,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub struct Prompt<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Prompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub async fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        self.out.write_all(text.as_ref().as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }

    /// One line with only its line ending removed. `back`, `reset` and
    /// `quit` interrupt; end of input counts as `quit`.
    async fn read_raw(&mut self, prompt: &str) -> Result<String, Interrupt> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await?;
        let Some(line) = self.lines.next_line().await? else {
            return Err(Interrupt::Quit);
        };
        match line.trim() {
            "back" => Err(Interrupt::Back),
            "reset" => Err(Interrupt::Reset),
            "quit" => Err(Interrupt::Quit),
            _ => Ok(line),
        }
    }

    async fn read(&mut self, prompt: &str) -> Result<String, Interrupt> {
        Ok(self.read_raw(prompt).await?.trim().to_string())
    }

    /// Ask for a value; a blank answer keeps `current`.
    pub async fn ask(&mut self, label: &str, current: &str) -> Result<String, Interrupt> {
        let prompt = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        let answer = self.read(&prompt).await?;
        Ok(if answer.is_empty() {
            current.to_string()
        } else {
            answer
        })
    }

    /// Ask for a secret without echoing the stored one. `None` keeps it.
    ///
    /// Surrounding whitespace is part of the secret.
    pub async fn ask_secret(
        &mut self,
        label: &str,
        has_value: bool,
    ) -> Result<Option<String>, Interrupt> {
        let prompt = if has_value {
            format!("{label} [unchanged]: ")
        } else {
            format!("{label}: ")
        };
        let answer = self.read_raw(&prompt).await?;
        let blank = answer.trim().is_empty();
        Ok((!blank || !has_value).then_some(answer))
    }

    pub async fn confirm(&mut self, label: &str, current: bool) -> Result<bool, Interrupt> {
        let hint = if current { "Y/n" } else { "y/N" };
        loop {
            let answer = self.read(&format!("{label} [{hint}]: ")).await?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(current),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("  Please answer y or n.").await?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(input: &'static str) -> Prompt<&'static [u8], Vec<u8>> {
        Prompt::new(input.as_bytes(), Vec::new())
    }

    #[tokio::test]
    async fn blank_answer_keeps_current_value() {
        let mut prompt = prompt("\n  Sydney  \n");

        assert_eq!(prompt.ask("City", "Perth").await.unwrap(), "Perth");
        assert_eq!(prompt.ask("City", "Perth").await.unwrap(), "Sydney");

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert!(output.contains("City [Perth]: "));
    }

    #[tokio::test]
    async fn keywords_interrupt() {
        let mut prompt = prompt("back\nreset\n");

        assert!(matches!(prompt.ask("Email", "").await, Err(Interrupt::Back)));
        assert!(matches!(prompt.ask("Email", "").await, Err(Interrupt::Reset)));
        assert!(matches!(prompt.ask("Email", "").await, Err(Interrupt::Quit)));
    }

    #[tokio::test]
    async fn secret_blank_keeps_existing() {
        let mut prompt = prompt("\n\n");

        assert_eq!(prompt.ask_secret("Password", true).await.unwrap(), None);
        assert_eq!(
            prompt.ask_secret("Password", false).await.unwrap(),
            Some(String::new())
        );
    }

    #[tokio::test]
    async fn secret_keeps_surrounding_spaces() {
        let mut prompt = prompt("  pass word  \r\n back \n");

        assert_eq!(
            prompt.ask_secret("Password", false).await.unwrap(),
            Some("  pass word  ".to_string())
        );
        assert!(matches!(
            prompt.ask_secret("Password", true).await,
            Err(Interrupt::Back)
        ));
    }

    #[tokio::test]
    async fn confirm_reasks_until_yes_or_no() {
        let mut prompt = prompt("maybe\nYES\n\n");

        assert!(prompt.confirm("Agree", false).await.unwrap());
        assert!(!prompt.confirm("Agree", false).await.unwrap());

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert!(output.contains("Please answer y or n."));
    }
}
