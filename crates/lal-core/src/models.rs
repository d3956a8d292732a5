//! Record types for the LAL format.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One decoded line: either a verbatim comment or a credential entry.
///
/// `PartialEq` and `Hash` follow loose equality: entries compare by login,
/// password and the invalid flag, comments by their text. Use
/// [`Record::strict_eq`] to compare every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Record {
    /// A comment line, stored including its `//` prefix.
    Comment(String),
    /// A credential entry.
    Entry(Entry),
}

/// Represents a credential entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    pub login: String,
    pub password: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub old_password: Option<String>,
    /// Set when the line carried the leading invalidity marker.
    #[serde(default)]
    pub invalid: bool,
}

impl Entry {
    /// Create an entry with the two required fields.
    ///
    /// Empty values are accepted here; they are rejected when the entry is
    /// encoded.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_old_password(mut self, old_password: impl Into<String>) -> Self {
        self.old_password = Some(old_password.into());
        self
    }

    pub fn with_invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn old_password(&self) -> Option<&str> {
        self.old_password.as_deref()
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn set_login(&mut self, login: impl Into<String>) {
        self.login = login.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn set_old_password(&mut self, old_password: Option<String>) {
        self.old_password = old_password;
    }

    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Whether both required fields are non-empty.
    pub fn has_credentials(&self) -> bool {
        !self.login.is_empty() && !self.password.is_empty()
    }

    fn loose_eq(&self, other: &Self) -> bool {
        self.login == other.login && self.password == other.password && self.invalid == other.invalid
    }

    fn strict_eq(&self, other: &Self) -> bool {
        self.loose_eq(other)
            && self.display_name == other.display_name
            && self.email == other.email
            && self.old_password == other.old_password
    }
}

impl Record {
    /// Create a comment record. The text is kept verbatim.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    /// Create an entry record with only the required fields set.
    pub fn entry(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Entry(Entry::new(login, password))
    }

    /// True for a comment record with non-empty text.
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(text) if !text.is_empty())
    }

    pub fn comment_text(&self) -> Option<&str> {
        match self {
            Self::Comment(text) => Some(text),
            Self::Entry(_) => None,
        }
    }

    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Comment(_) => None,
        }
    }

    pub fn as_entry_mut(&mut self) -> Option<&mut Entry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Comment(_) => None,
        }
    }

    /// Replace the comment text. Has no effect on entry records.
    pub fn set_comment(&mut self, text: impl Into<String>) {
        if let Self::Comment(current) = self {
            *current = text.into();
        }
    }

    pub fn login(&self) -> Option<&str> {
        self.as_entry().map(Entry::login)
    }

    pub fn password(&self) -> Option<&str> {
        self.as_entry().map(Entry::password)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.as_entry().and_then(Entry::display_name)
    }

    pub fn email(&self) -> Option<&str> {
        self.as_entry().and_then(Entry::email)
    }

    pub fn old_password(&self) -> Option<&str> {
        self.as_entry().and_then(Entry::old_password)
    }

    /// Comments are never invalid.
    pub fn is_invalid(&self) -> bool {
        self.as_entry().is_some_and(Entry::is_invalid)
    }

    /// Compare identity-bearing fields only.
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Comment(a), Self::Comment(b)) => a == b,
            (Self::Entry(a), Self::Entry(b)) => a.loose_eq(b),
            _ => false,
        }
    }

    /// Compare every field. Comments still compare by text only.
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Comment(a), Self::Comment(b)) => a == b,
            (Self::Entry(a), Self::Entry(b)) => a.strict_eq(b),
            _ => false,
        }
    }

    /// Encode this record as a single line.
    pub fn to_line(&self) -> crate::Result<String> {
        crate::codec::encode(self)
    }
}

impl From<Entry> for Record {
    fn from(entry: Entry) -> Self {
        Self::Entry(entry)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.loose_eq(other)
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Comment(text) => {
                0u8.hash(state);
                text.hash(state);
            }
            Self::Entry(entry) => {
                1u8.hash(state);
                entry.login.hash(state);
                entry.password.hash(state);
                entry.invalid.hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, Record};
    use std::collections::HashSet;

    fn full_entry() -> Entry {
        Entry::new("user", "pass")
            .with_display_name("display")
            .with_email("email")
            .with_old_password("oldpass")
            .with_invalid(true)
    }

    #[test]
    fn comment_mode_requires_text() {
        assert!(Record::comment("// note").is_comment());
        assert!(!Record::comment("").is_comment());
        assert!(!Record::entry("user", "pass").is_comment());
    }

    #[test]
    fn loose_equality_ignores_optional_fields() {
        let bare = Record::from(Entry::new("user", "pass").with_invalid(true));
        let full = Record::from(full_entry());
        assert_eq!(bare, full);
        assert!(bare.loose_eq(&full));
        assert!(!bare.strict_eq(&full));
    }

    #[test]
    fn loose_equality_checks_invalid_flag() {
        let valid = Record::entry("user", "pass");
        let invalid = Record::from(Entry::new("user", "pass").with_invalid(true));
        assert_ne!(valid, invalid);
    }

    #[test]
    fn strict_equality_compares_all_fields() {
        let a = Record::from(full_entry());
        let mut b = Record::from(full_entry());
        assert!(a.strict_eq(&b));

        b.as_entry_mut().expect("entry").set_email(Some("other".to_string()));
        assert!(!a.strict_eq(&b));
        assert!(a.loose_eq(&b));
    }

    #[test]
    fn comments_compare_by_text() {
        let a = Record::comment("// one");
        assert!(a.strict_eq(&Record::comment("// one")));
        assert!(!a.loose_eq(&Record::comment("// two")));
        assert!(!a.loose_eq(&Record::entry("user", "pass")));
    }

    #[test]
    fn hash_follows_loose_equality() {
        let mut set = HashSet::new();
        set.insert(Record::from(full_entry()));
        assert!(set.contains(&Record::from(Entry::new("user", "pass").with_invalid(true))));
        assert!(!set.contains(&Record::entry("user", "pass")));
    }

    #[test]
    fn entry_accessors_on_comment_are_empty() {
        let mut comment = Record::comment("// note");
        assert_eq!(comment.login(), None);
        assert_eq!(comment.password(), None);
        assert!(!comment.is_invalid());

        comment.set_comment("// changed");
        assert_eq!(comment.comment_text(), Some("// changed"));
    }

    #[test]
    fn mutators_update_fields() {
        let mut entry = Entry::new("", "");
        assert!(!entry.has_credentials());

        entry.set_login("user");
        entry.set_password("pass");
        entry.set_display_name(Some("Name".to_string()));
        entry.set_invalid(true);

        assert!(entry.has_credentials());
        assert_eq!(entry.login(), "user");
        assert_eq!(entry.display_name(), Some("Name"));
        assert!(entry.is_invalid());
    }
}
