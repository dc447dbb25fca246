//! Minimal XML reader for build descriptors.
//!
//! Parses the element/attribute/text subset a pom uses into `XmlNode`
//! trees. Comments, processing instructions, and the document type
//! declaration are skipped. Mixed content is rejected: an element holds
//! either text or child elements, matching the pom schema. Parse errors
//! carry the line number of the offending input.

use super::XmlNode;
use crate::error::{JavelinError, Result};
use std::fs;
use std::path::Path;

/// Parse a build descriptor from a file.
///
/// A missing or unreadable file is a `DescriptorParse` error naming the path.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<XmlNode> {
    let path = path.as_ref();

    let input = fs::read_to_string(path)
        .map_err(|e| JavelinError::DescriptorParse(format!("{}: {}", path.display(), e)))?;

    parse_str(&input).map_err(|e| match e {
        JavelinError::DescriptorParse(msg) => {
            JavelinError::DescriptorParse(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse a build descriptor from a string.
pub fn parse_str(input: &str) -> Result<XmlNode> {
    let mut parser = Parser::new(input);

    parser.skip_misc()?;
    let root = parser.parse_element()?;
    parser.skip_misc()?;

    if !parser.at_end() {
        return Err(parser.error("trailing content after document element"));
    }

    Ok(root)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn consume_str(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            for _ in s.chars() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    fn consume_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn error(&self, msg: impl std::fmt::Display) -> JavelinError {
        JavelinError::DescriptorParse(format!("line {}: {}", self.line, msg))
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }
    }

    /// Skip whitespace, comments, processing instructions, and DOCTYPE.
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_ws();
            if self.starts_with("<!--") {
                self.skip_comment()?;
            } else if self.starts_with("<?") {
                self.skip_until("?>")?;
            } else if self.starts_with("<!DOCTYPE") {
                self.skip_until(">")?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        self.consume_str("<!--");
        while !self.starts_with("-->") {
            if self.bump().is_none() {
                return Err(self.error("unterminated comment"));
            }
        }
        self.consume_str("-->");
        Ok(())
    }

    fn skip_until(&mut self, end: &str) -> Result<()> {
        while !self.starts_with(end) {
            if self.bump().is_none() {
                return Err(self.error(format!("unterminated construct, expected '{}'", end)));
            }
        }
        self.consume_str(end);
        Ok(())
    }

    fn read_name(&mut self) -> Result<String> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':') {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if name.is_empty() {
            return Err(self.error("expected a name"));
        }
        Ok(name)
    }

    fn parse_element(&mut self) -> Result<XmlNode> {
        if !self.consume_char('<') {
            return Err(self.error("expected '<'"));
        }
        let name = self.read_name()?;
        let mut node = XmlNode::new(name);

        // Attributes until the tag closes.
        loop {
            self.skip_ws();
            match self.peek() {
                Some('/') => {
                    self.bump();
                    if !self.consume_char('>') {
                        return Err(self.error("expected '>' after '/'"));
                    }
                    return Ok(node);
                }
                Some('>') => {
                    self.bump();
                    break;
                }
                Some(_) => {
                    let attr = self.parse_attribute()?;
                    node.attributes.push(attr);
                }
                None => {
                    return Err(self.error(format!("unexpected end of input in <{}>", node.name)));
                }
            }
        }

        // Content until the matching close tag.
        let mut text = String::new();
        loop {
            if self.at_end() {
                return Err(self.error(format!("unexpected end of input inside <{}>", node.name)));
            }

            if self.starts_with("<!--") {
                self.skip_comment()?;
            } else if self.starts_with("<![CDATA[") {
                self.consume_str("<![CDATA[");
                while !self.starts_with("]]>") {
                    match self.bump() {
                        Some(c) => text.push(c),
                        None => return Err(self.error("unterminated CDATA section")),
                    }
                }
                self.consume_str("]]>");
            } else if self.starts_with("</") {
                self.consume_str("</");
                let close = self.read_name()?;
                if close != node.name {
                    return Err(
                        self.error(format!("expected </{}>, found </{}>", node.name, close))
                    );
                }
                self.skip_ws();
                if !self.consume_char('>') {
                    return Err(self.error(format!("expected '>' to close </{}>", close)));
                }
                break;
            } else if self.peek() == Some('<') {
                let child = self.parse_element()?;
                node.children.push(child);
            } else {
                self.read_text_run(&mut text)?;
            }
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if !node.children.is_empty() {
                return Err(self.error(format!(
                    "mixed text and element content in <{}> is not supported",
                    node.name
                )));
            }
            node.value = Some(trimmed.to_string());
        }

        Ok(node)
    }

    fn parse_attribute(&mut self) -> Result<(String, String)> {
        let name = self.read_name()?;
        self.skip_ws();
        if !self.consume_char('=') {
            return Err(self.error(format!("expected '=' after attribute '{}'", name)));
        }
        self.skip_ws();

        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                q
            }
            _ => return Err(self.error(format!("expected quoted value for attribute '{}'", name))),
        };

        let mut value = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some('&') => value.push(self.parse_entity()?),
                Some(_) => {
                    if let Some(c) = self.bump() {
                        value.push(c);
                    }
                }
                None => return Err(self.error(format!("unterminated value for '{}'", name))),
            }
        }

        Ok((name, value))
    }

    fn read_text_run(&mut self, text: &mut String) -> Result<()> {
        while let Some(c) = self.peek() {
            match c {
                '<' => break,
                '&' => text.push(self.parse_entity()?),
                _ => {
                    if let Some(c) = self.bump() {
                        text.push(c);
                    }
                }
            }
        }
        Ok(())
    }

    /// Decode an entity reference starting at '&'.
    fn parse_entity(&mut self) -> Result<char> {
        self.consume_char('&');

        let mut name = String::new();
        loop {
            match self.bump() {
                Some(';') => break,
                Some(c) if name.len() < 8 => name.push(c),
                _ => return Err(self.error("unterminated entity reference")),
            }
        }

        match name.as_str() {
            "amp" => Ok('&'),
            "lt" => Ok('<'),
            "gt" => Ok('>'),
            "quot" => Ok('"'),
            "apos" => Ok('\''),
            _ => {
                let code = if let Some(hex) = name.strip_prefix("#x") {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = name.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    None
                };

                code.and_then(char::from_u32)
                    .ok_or_else(|| self.error(format!("unknown entity '&{};'", name)))
            }
        }
    }
}
