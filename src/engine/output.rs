use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text")]
pub enum OutputBlock {
    Title(String),
    Text(String),
    Event(String),
    Map(String),
    Exits(String),
    Prompt(String),
}

#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Title(s));
        }
    }

    pub fn say(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Text(s));
        }
    }

    pub fn event(&mut self, s: impl Into<String>) {
        let s = s.into();
        if !s.trim().is_empty() {
            self.blocks.push(OutputBlock::Event(s));
        }
    }

    pub fn map(&mut self, s: impl Into<String>) {
        self.blocks.push(OutputBlock::Map(s.into()));
    }

    pub fn set_exits(&mut self, s: impl Into<String>) {
        let s = s.into();
        if s.trim().is_empty() {
            return;
        }

        // only one Exits block
        self.blocks.retain(|b| !matches!(b, OutputBlock::Exits(_)));
        self.blocks.push(OutputBlock::Exits(s));
    }

    /// A question the next input answers. Replaces any earlier prompt.
    pub fn prompt(&mut self, s: impl Into<String>) {
        self.blocks.retain(|b| !matches!(b, OutputBlock::Prompt(_)));
        self.blocks.push(OutputBlock::Prompt(s.into()));
    }

    /// All text, one block per line; handy for tests and logs.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| match b {
                OutputBlock::Title(s)
                | OutputBlock::Text(s)
                | OutputBlock::Event(s)
                | OutputBlock::Map(s)
                | OutputBlock::Exits(s)
                | OutputBlock::Prompt(s) => s.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_dropped_and_exits_are_unique() {
        let mut out = Output::new();
        out.say("   ");
        out.set_exits("Exits: north");
        out.set_exits("Exits: south");
        assert_eq!(out.blocks, vec![OutputBlock::Exits("Exits: south".into())]);
    }

    #[test]
    fn prompt_stays_last() {
        let mut out = Output::new();
        out.prompt("Fight? (y/n)");
        out.say("hello");
        out.prompt("Which weapon?");
        assert_eq!(out.blocks.last(), Some(&OutputBlock::Prompt("Which weapon?".into())));
        assert_eq!(out.blocks.len(), 2);
    }
}
