//! Parser for the xbps package database (`pkgdb-0.38.plist`).
//!
//! The database is an XML property list whose top-level dictionary maps a
//! package name to that package's dictionary:
//!
//! ```text
//! <plist version="1.0">
//! <dict>
//!     <key>bash</key>
//!     <dict>
//!         <key>pkgver</key>         <string>bash-5.2.21_1</string>
//!         <key>short_desc</key>     <string>GNU Bourne Again Shell</string>
//!         <key>installed_size</key> <integer>8634368</integer>
//!         <key>state</key>          <string>installed</string>
//!         ...
//!     </dict>
//!     <key>_XBPS_ALTERNATIVES_</key>
//!     <dict>...</dict>
//! </dict>
//! </plist>
//! ```

use crate::domain::{BrowseError, InstallState, Origin, Record, Result};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Parses a pkgdb plist into records sorted by identity.
///
/// Entries without `pkgver` or `short_desc` are skipped, as are
/// non-dictionary values and xbps-internal `_XBPS_*` keys.
///
/// # Errors
///
/// Returns [`BrowseError::Parse`] if the document is not a well-formed
/// property list with a top-level dictionary.
pub fn parse(xml: &str) -> Result<Vec<Record>> {
    let _span = tracing::debug_span!("parse_pkgdb", xml_len = xml.len()).entered();

    let mut reader = PlistReader::new(xml);
    let Value::Dict(entries) = reader.read_document()? else {
        return Err(BrowseError::Parse("pkgdb root is not a dictionary".to_string()));
    };

    let mut skipped = 0_usize;
    let mut records: Vec<Record> = entries
        .into_iter()
        .filter(|(name, _)| !name.starts_with("_XBPS_"))
        .filter_map(|(name, value)| {
            let record = match value {
                Value::Dict(fields) => to_record(fields),
                _ => None,
            };
            if record.is_none() {
                skipped += 1;
                tracing::trace!(package = %name, "pkgdb entry skipped");
            }
            record
        })
        .collect();

    records.sort_by(|a, b| a.identity.cmp(&b.identity));
    tracing::debug!(records = records.len(), skipped, "pkgdb parsed");
    Ok(records)
}

fn to_record(fields: Vec<(String, Value)>) -> Option<Record> {
    let mut pkgver = None;
    let mut short_desc = None;
    let mut long_desc = None;
    let mut maintainer = None;
    let mut homepage = None;
    let mut license = None;
    let mut installed_size = None;
    let mut state = None;

    for (key, value) in fields {
        match (key.as_str(), value) {
            ("pkgver", Value::String(s)) => pkgver = Some(s),
            ("short_desc", Value::String(s)) => short_desc = Some(s),
            ("long_desc", Value::String(s)) => long_desc = Some(s),
            ("maintainer", Value::String(s)) => maintainer = Some(s),
            ("homepage", Value::String(s)) => homepage = Some(s),
            ("license", Value::String(s)) => license = Some(s),
            ("state", Value::String(s)) => state = Some(InstallState::from_pkgdb(&s)),
            ("installed_size", Value::Integer(bytes)) => installed_size = Some(format_size(bytes)),
            _ => {}
        }
    }

    let mut record = Record::new(Origin::Local, pkgver?, short_desc?);
    record.long_summary = long_desc;
    record.maintainer = maintainer;
    record.homepage = homepage;
    record.license = license;
    record.installed_size = installed_size;
    record.install_state = state;
    Some(record)
}

/// Formats a byte count with binary units, e.g. `8.2 MiB`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

/// Subset of plist values the pkgdb uses.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    String(String),
    Integer(u64),
    Bool(bool),
    Array(Vec<Value>),
    Dict(Vec<(String, Value)>),
    /// `real`, `date`, `data` and anything unknown.
    Other,
}

enum Element {
    Start(String),
    Empty(String),
    End,
    Eof,
}

struct PlistReader<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> PlistReader<'a> {
    fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }

    /// Reads `<plist>` and returns its single root value.
    fn read_document(&mut self) -> Result<Value> {
        match self.next_element()? {
            Element::Start(name) if name == "plist" => {}
            Element::Start(name) | Element::Empty(name) => {
                return Err(BrowseError::Parse(format!("expected <plist>, found <{name}>")));
            }
            Element::End | Element::Eof => {
                return Err(BrowseError::Parse("missing <plist> element".to_string()));
            }
        }

        match self.next_element()? {
            Element::Start(name) => self.read_value(&name, false),
            Element::Empty(name) => self.read_value(&name, true),
            Element::End | Element::Eof => Err(BrowseError::Parse("empty <plist>".to_string())),
        }
    }

    /// Next start, empty or end tag, skipping declarations, comments and
    /// whitespace between elements.
    fn next_element(&mut self) -> Result<Element> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => return Ok(Element::Start(tag_name(e.name().as_ref()))),
                Event::Empty(e) => return Ok(Element::Empty(tag_name(e.name().as_ref()))),
                Event::End(_) => return Ok(Element::End),
                Event::Eof => return Ok(Element::Eof),
                Event::Text(text) => {
                    let text = text.decode().map_err(parse_error)?;
                    if !text.trim().is_empty() {
                        return Err(BrowseError::Parse(format!(
                            "unexpected text between elements: {}",
                            text.trim()
                        )));
                    }
                }
                _ => {}
            }
        }
    }

    fn read_value(&mut self, name: &str, empty: bool) -> Result<Value> {
        match name {
            "dict" if empty => Ok(Value::Dict(Vec::new())),
            "dict" => self.read_dict(),
            "array" if empty => Ok(Value::Array(Vec::new())),
            "array" => self.read_array(),
            "true" | "false" => {
                if !empty {
                    self.read_text()?;
                }
                Ok(Value::Bool(name == "true"))
            }
            "string" if empty => Ok(Value::String(String::new())),
            "string" => Ok(Value::String(self.read_text()?)),
            "integer" => {
                let text = if empty { String::new() } else { self.read_text()? };
                let trimmed = text.trim();
                // Negative or oversized integers are kept as opaque values.
                Ok(trimmed.parse().map_or(Value::Other, Value::Integer))
            }
            _ => {
                if !empty {
                    self.skip_subtree()?;
                }
                Ok(Value::Other)
            }
        }
    }

    fn read_dict(&mut self) -> Result<Value> {
        let mut entries = Vec::new();
        loop {
            let key = match self.next_element()? {
                Element::Start(name) if name == "key" => self.read_text()?,
                Element::Empty(name) if name == "key" => String::new(),
                Element::End => return Ok(Value::Dict(entries)),
                Element::Eof => return Err(unexpected_eof("dict")),
                Element::Start(name) | Element::Empty(name) => {
                    return Err(BrowseError::Parse(format!("expected <key> in dict, found <{name}>")));
                }
            };

            let value = match self.next_element()? {
                Element::Start(name) => self.read_value(&name, false)?,
                Element::Empty(name) => self.read_value(&name, true)?,
                Element::End | Element::Eof => {
                    return Err(BrowseError::Parse(format!("key {key:?} has no value")));
                }
            };
            entries.push((key, value));
        }
    }

    fn read_array(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            match self.next_element()? {
                Element::Start(name) => items.push(self.read_value(&name, false)?),
                Element::Empty(name) => items.push(self.read_value(&name, true)?),
                Element::End => return Ok(Value::Array(items)),
                Element::Eof => return Err(unexpected_eof("array")),
            }
        }
    }

    /// Collects character data up to the closing tag of a scalar element.
    fn read_text(&mut self) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(e) => text.push_str(&e.decode().map_err(parse_error)?),
                Event::CData(e) => text.push_str(&e.decode().map_err(parse_error)?),
                Event::GeneralRef(e) => {
                    if let Some(ch) = e.resolve_char_ref()? {
                        text.push(ch);
                    } else {
                        let entity = e.decode().map_err(parse_error)?;
                        let resolved = resolve_predefined_entity(&entity).ok_or_else(|| {
                            BrowseError::Parse(format!("unknown entity &{entity};"))
                        })?;
                        text.push_str(resolved);
                    }
                }
                Event::End(_) => return Ok(text),
                Event::Start(e) | Event::Empty(e) => {
                    return Err(BrowseError::Parse(format!(
                        "unexpected <{}> inside a scalar value",
                        tag_name(e.name().as_ref())
                    )));
                }
                Event::Eof => return Err(unexpected_eof("text")),
                _ => {}
            }
        }
    }

    fn skip_subtree(&mut self) -> Result<()> {
        let mut depth = 1_usize;
        while depth > 0 {
            match self.reader.read_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(unexpected_eof("element")),
                _ => {}
            }
        }
        Ok(())
    }
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn parse_error(err: impl std::fmt::Display) -> BrowseError {
    BrowseError::Parse(err.to_string())
}

fn unexpected_eof(context: &str) -> BrowseError {
    BrowseError::Parse(format!("unexpected end of document inside {context}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PKGDB: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple Computer//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>zsh</key>
	<dict>
		<key>automatic-install</key>
		<true/>
		<key>homepage</key>
		<string>https://www.zsh.org</string>
		<key>installed_size</key>
		<integer>8634368</integer>
		<key>license</key>
		<string>MIT, GPL-3.0-or-later</string>
		<key>maintainer</key>
		<string>Jane Doe &lt;jane@example.org&gt;</string>
		<key>pkgver</key>
		<string>zsh-5.9_1</string>
		<key>run_depends</key>
		<array>
			<string>glibc&gt;=2.36_1</string>
		</array>
		<key>short_desc</key>
		<string>Z shell</string>
		<key>state</key>
		<string>installed</string>
	</dict>
	<key>bash</key>
	<dict>
		<key>pkgver</key>
		<string>bash-5.2.21_1</string>
		<key>short_desc</key>
		<string>GNU Bourne Again Shell &amp; more</string>
		<key>long_desc</key>
		<string><![CDATA[The <bash> shell]]></string>
		<key>state</key>
		<string>unpacked</string>
		<key>metafile-sha256</key>
		<data>YWJj</data>
	</dict>
	<key>nodesc</key>
	<dict>
		<key>pkgver</key>
		<string>nodesc-1.0_1</string>
	</dict>
	<key>_XBPS_ALTERNATIVES_</key>
	<dict>
		<key>sh</key>
		<dict/>
	</dict>
	<key>weird</key>
	<string>not a dict</string>
</dict>
</plist>
"#;

    #[test]
    fn parses_and_sorts_packages() {
        let records = parse(PKGDB).unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(ids, vec!["bash-5.2.21_1", "zsh-5.9_1"]);
        assert!(records.iter().all(|r| r.origin == Origin::Local));
    }

    #[test]
    fn reads_optional_fields_and_entities() {
        let records = parse(PKGDB).unwrap();
        let zsh = &records[1];
        assert_eq!(zsh.short_summary, "Z shell");
        assert_eq!(zsh.homepage.as_deref(), Some("https://www.zsh.org"));
        assert_eq!(zsh.maintainer.as_deref(), Some("Jane Doe <jane@example.org>"));
        assert_eq!(zsh.license.as_deref(), Some("MIT, GPL-3.0-or-later"));
        assert_eq!(zsh.installed_size.as_deref(), Some("8.2 MiB"));
        assert_eq!(zsh.install_state, Some(InstallState::Installed));

        let bash = &records[0];
        assert_eq!(bash.short_summary, "GNU Bourne Again Shell & more");
        assert_eq!(bash.long_summary.as_deref(), Some("The <bash> shell"));
        assert_eq!(bash.install_state, Some(InstallState::Unpacked));
        assert!(bash.homepage.is_none());
        assert!(bash.installed_size.is_none());
    }

    #[test]
    fn empty_database_has_no_records() {
        let xml = r#"<?xml version="1.0"?><plist version="1.0"><dict/></plist>"#;
        assert!(parse(xml).unwrap().is_empty());
    }

    #[test]
    fn malformed_documents_are_parse_errors() {
        for xml in [
            "",
            "<plist><dict>",
            "<plist><array></array></plist>",
            "<dict></dict>",
            "<plist><dict><string>x</string></dict></plist>",
        ] {
            assert!(matches!(parse(xml), Err(BrowseError::Parse(_))), "{xml:?}");
        }
    }

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KiB");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }
}
