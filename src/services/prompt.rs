use crate::domain::constants::AFFIRMATIVE_TOKENS;

/// Source of operator confirmation, injected into the gate's decision so a
/// scripted source can stand in for the terminal.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> anyhow::Result<bool>;
}

pub fn is_affirmative(answer: &str) -> bool {
    let token = answer.trim().to_ascii_lowercase();
    AFFIRMATIVE_TOKENS.contains(&token.as_str())
}

/// Blocks on one line of stdin. No timeout: the process waits for the
/// operator indefinitely.
pub struct TerminalConfirmer;

impl Confirm for TerminalConfirmer {
    fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        use std::io::Write;
        eprint!("{} [y/N] ", question);
        std::io::stderr().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(is_affirmative(&line))
    }
}

/// `--yes`: every question is answered affirmatively without reading stdin.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> anyhow::Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
pub struct Scripted {
    pub answers: Vec<bool>,
    pub asked: usize,
}

#[cfg(test)]
impl Scripted {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.to_vec(),
            asked: 0,
        }
    }
}

#[cfg(test)]
impl Confirm for Scripted {
    fn confirm(&mut self, _question: &str) -> anyhow::Result<bool> {
        let answer = *self
            .answers
            .get(self.asked)
            .expect("unexpected confirmation prompt");
        self.asked += 1;
        Ok(answer)
    }
}
