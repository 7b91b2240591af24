//! Streaming JSON token writer
//!
//! Fields are conditionally present, so separators cannot be decided up
//! front. Each open object or array keeps a "first member" flag; a comma is
//! written before every member except the first.

use std::io::Write;

use serde_json::Value;

use crate::error::Result;

const INDENT: &[u8] = b"  ";

pub struct JsonWriter<W: Write> {
    out: W,
    pretty: bool,
    first: Vec<bool>,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self {
            out,
            pretty,
            first: Vec::new(),
        }
    }

    pub fn begin_object(&mut self) -> Result<()> {
        self.out.write_all(b"{")?;
        self.first.push(true);
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<()> {
        self.close(b"}")
    }

    pub fn begin_array(&mut self) -> Result<()> {
        self.out.write_all(b"[")?;
        self.first.push(true);
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<()> {
        self.close(b"]")
    }

    /// Start an object member: separator, quoted name and colon.
    pub fn key(&mut self, name: &str) -> Result<()> {
        self.separator()?;
        serde_json::to_writer(&mut self.out, name)?;
        self.out
            .write_all(if self.pretty { b": " } else { b":" })?;
        Ok(())
    }

    /// Start an array member.
    pub fn item(&mut self) -> Result<()> {
        self.separator()
    }

    pub fn value(&mut self, value: &Value) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        Ok(())
    }

    pub fn string(&mut self, value: &str) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        Ok(())
    }

    pub fn null(&mut self) -> Result<()> {
        self.out.write_all(b"null")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn separator(&mut self) -> Result<()> {
        if let Some(first) = self.first.last_mut() {
            if !*first {
                self.out.write_all(b",")?;
            }
            *first = false;
        }
        if self.pretty {
            self.newline(self.first.len())?;
        }
        Ok(())
    }

    fn close(&mut self, token: &[u8]) -> Result<()> {
        let empty = self.first.pop().unwrap_or(true);
        if self.pretty && !empty {
            self.newline(self.first.len())?;
        }
        self.out.write_all(token)?;
        Ok(())
    }

    fn newline(&mut self, depth: usize) -> Result<()> {
        self.out.write_all(b"\n")?;
        for _ in 0..depth {
            self.out.write_all(INDENT)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(pretty: bool) -> String {
        let mut writer = JsonWriter::new(Vec::new(), pretty);
        writer.begin_object().unwrap();
        writer.key("resourceType").unwrap();
        writer.string("Patient").unwrap();
        writer.key("given").unwrap();
        writer.begin_array().unwrap();
        writer.item().unwrap();
        writer.string("a").unwrap();
        writer.item().unwrap();
        writer.null().unwrap();
        writer.end_array().unwrap();
        writer.key("meta").unwrap();
        writer.begin_object().unwrap();
        writer.end_object().unwrap();
        writer.end_object().unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn compact_output_has_no_stray_commas() {
        assert_eq!(
            render(false),
            r#"{"resourceType":"Patient","given":["a",null],"meta":{}}"#
        );
    }

    #[test]
    fn pretty_output_indents_two_spaces() {
        let expected = "{\n  \"resourceType\": \"Patient\",\n  \"given\": [\n    \"a\",\n    null\n  ],\n  \"meta\": {}\n}";
        assert_eq!(render(true), expected);
    }

    #[test]
    fn strings_are_not_html_escaped() {
        let mut writer = JsonWriter::new(Vec::new(), false);
        writer.value(&json!("<b>&</b>")).unwrap();
        assert_eq!(writer.into_inner(), br#""<b>&</b>""#.to_vec());
    }
}
