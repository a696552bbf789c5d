//! Minimal form controls for filter and sort widgets.
//!
//! Attributes are always written in name order so the markup is stable.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

pub type Attributes = BTreeMap<String, String>;

/// Build [`Attributes`] from pairs: `attrs([("class", "wide")])`.
pub fn attrs<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_attributes(out: &mut String, attributes: &Attributes) {
    for (name, value) in attributes {
        // writing into a String cannot fail
        let _ = write!(out, " {}=\"{}\"", escape(name), escape(value));
    }
}

/// `<input type="text" />`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    name: String,
    value: Option<String>,
    attributes: Attributes,
}

impl Input {
    pub fn new(name: impl Into<String>, value: Option<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            value,
            attributes,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut attributes = self.attributes.clone();
        attributes.insert("name".into(), self.name.clone());
        attributes.insert("type".into(), "text".into());
        attributes.insert("value".into(), self.value.clone().unwrap_or_default());

        let mut out = String::from("<input");
        write_attributes(&mut out, &attributes);
        out.push_str(" />");
        out
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// `<select>` with one `<option>` per `(value, label)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    name: String,
    options: Vec<(String, String)>,
    selected: Option<String>,
    attributes: Attributes,
    placeholder: Option<String>,
}

impl Select {
    pub fn new(
        name: impl Into<String>,
        options: Vec<(String, String)>,
        selected: Option<String>,
        attributes: Attributes,
        placeholder: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            options,
            selected,
            attributes,
            placeholder,
        }
    }

    #[must_use]
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut attributes = self.attributes.clone();
        attributes.insert("name".into(), self.name.clone());

        let mut out = String::from("<select");
        write_attributes(&mut out, &attributes);
        out.push('>');

        if let Some(placeholder) = &self.placeholder {
            let _ = writeln!(out, "<option value=\"\">{}</option>", escape(placeholder));
        }

        for (value, label) in &self.options {
            let mut option = Attributes::new();
            if self.selected.as_deref() == Some(value.as_str()) {
                option.insert("selected".into(), "selected".into());
            }
            option.insert("value".into(), value.clone());

            out.push_str("<option");
            write_attributes(&mut out, &option);
            let _ = writeln!(out, ">{}</option>", escape(label));
        }

        out.push_str("</select>");
        out
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input() {
        let input = Input::new("test", Some("1".into()), Attributes::new());
        assert_eq!(input.to_html(), r#"<input name="test" type="text" value="1" />"#);

        let input = Input::new("test", None, attrs([("class", "hello")]));
        assert_eq!(
            input.to_html(),
            r#"<input class="hello" name="test" type="text" value="" />"#
        );
    }

    #[test]
    fn test_input_escapes() {
        let input = Input::new("q", Some(r#"a"<b>"#.into()), Attributes::new());
        assert_eq!(
            input.to_html(),
            r#"<input name="q" type="text" value="a&quot;&lt;b&gt;" />"#
        );
    }

    #[test]
    fn test_select() {
        let select = Select::new(
            "test",
            vec![("1".into(), "one".into()), ("2".into(), "two".into())],
            Some("1".into()),
            Attributes::new(),
            None,
        );
        let expected = "<select name=\"test\">\
            <option selected=\"selected\" value=\"1\">one</option>\n\
            <option value=\"2\">two</option>\n\
            </select>";
        assert_eq!(select.to_html(), expected);
    }

    #[test]
    fn test_select_placeholder() {
        let select = Select::new(
            "status",
            vec![("new".into(), "New".into())],
            None,
            attrs([("id", "status")]),
            Some("Any".into()),
        );
        assert_eq!(
            select.to_html(),
            "<select id=\"status\" name=\"status\"><option value=\"\">Any</option>\n<option value=\"new\">New</option>\n</select>"
        );
    }
}
