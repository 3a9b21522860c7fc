/// Byte-order mark prepended to every CSV export so spreadsheet software
/// picks UTF-8 for non-ASCII member and task names.
pub const UTF8_BOM: char = '\u{FEFF}';

/// One CSV cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// Always wrapped in double quotes, embedded quotes doubled.
    Quoted(&'a str),
    /// Written bare unless it contains a delimiter, quote or line break.
    Plain(&'a str),
    Int(i64),
}

/// Builds a CSV document in memory with `\n` line endings.
#[derive(Debug, Default)]
pub struct CsvBuilder {
    buf: String,
}

impl CsvBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the document with a UTF-8 byte-order mark.
    pub fn with_bom() -> Self {
        let mut builder = Self::new();
        builder.buf.push(UTF8_BOM);
        builder
    }

    pub fn row(&mut self, fields: &[Field<'_>]) -> &mut Self {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            match field {
                Field::Quoted(text) => push_quoted(&mut self.buf, text),
                Field::Plain(text) if needs_quoting(text) => push_quoted(&mut self.buf, text),
                Field::Plain(text) => self.buf.push_str(text),
                Field::Int(n) => self.buf.push_str(&n.to_string()),
            }
        }
        self.buf.push('\n');
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

fn needs_quoting(text: &str) -> bool {
    text.contains([',', '"', '\n', '\r'])
}

fn push_quoted(buf: &mut String, text: &str) {
    buf.push('"');
    buf.push_str(&text.replace('"', "\"\""));
    buf.push('"');
}
