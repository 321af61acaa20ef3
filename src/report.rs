//! One-shot output for `--print`: the same data the interactive view shows,
//! as plain text or JSON.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::keyboard::Keyboard;
use crate::view::{ChordView, KeyPaint};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub title: String,
    #[serde(flatten)]
    pub view: &'a ChordView,
    pub keys: Vec<KeyPaint>,
}

impl<'a> Report<'a> {
    pub fn new(view: &'a ChordView, keyboard: &Keyboard) -> Self {
        Self { title: view.title(), view, keys: view.paint_keys(keyboard) }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![self.title.clone()];
        if self.view.chord.is_empty() {
            lines.push(format!("No notes for {}", self.view.chord.symbol));
        } else {
            lines.push(format!("Root position: {}", self.view.chord.notes.join(" ")));
            lines.push(format!("Inverted:      {}", self.view.inverted.join(" ")));
            lines.push("Legend:".to_string());
            for entry in &self.view.legend {
                lines.push(format!("  {:<4} {}", entry.note, entry.role.label));
            }
            let lit: Vec<&str> = self
                .keys
                .iter()
                .filter(|k| k.position.is_some())
                .map(|k| k.key.as_str())
                .collect();
            lines.push(format!("Keys: {}", lit.join(" ")));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
