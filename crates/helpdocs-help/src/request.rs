//! Documentation page requests.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::category::ContentCategory;

/// Module page value that selects the module's table of contents.
pub const TABLE_OF_CONTENTS: &str = "table-of-contents";

/// Documentation type shown when a module page names none.
pub const DEFAULT_DOC_TYPE: &str = "Help";

/// Slug shown when a module page names none, and the last-resort fallback.
pub const INTRODUCTION: &str = "introduction";

/// A request for one documentation page.
///
/// Used as the cache key for rendered pages, so it carries everything that
/// influences resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// Documentation tree to resolve in.
    pub category: ContentCategory,
    /// Page slug relative to the tree root. Module pages may use `<type>/<page>`.
    pub page: Option<String>,
    /// Module identifier (module help only).
    pub module_id: Option<String>,
    /// Requested language code.
    pub language: String,
}

impl PageRequest {
    /// Request a general help page.
    #[must_use]
    pub fn general(page: Option<&str>) -> Self {
        Self::new(ContentCategory::GeneralHelp, page)
    }

    /// Request a developer guide page.
    #[must_use]
    pub fn developer(page: Option<&str>) -> Self {
        Self::new(ContentCategory::DeveloperHelp, page)
    }

    /// Request a module help page.
    #[must_use]
    pub fn module(module_id: &str, page: Option<&str>, language: &str) -> Self {
        Self {
            category: ContentCategory::ModuleHelp,
            page: page.map(str::to_owned),
            module_id: Some(module_id.to_owned()),
            language: language.to_owned(),
        }
    }

    fn new(category: ContentCategory, page: Option<&str>) -> Self {
        Self {
            category,
            page: page.map(str::to_owned),
            module_id: None,
            language: "en".to_owned(),
        }
    }

    /// Set the requested language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// A module page split into documentation type and slug.
///
/// `Help/pricing` addresses `Docs/Help/<lang>/pricing.md`; `Dev/hooks`
/// addresses the developer docs shipped with the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePage {
    /// Documentation type directory (`Help`, `Dev`, ...). May be empty.
    pub doc_type: String,
    /// File name without the `.md` extension.
    pub slug: String,
}

impl ModulePage {
    /// Parse the `page` value of a module help request.
    ///
    /// An absent page or [`TABLE_OF_CONTENTS`] selects `Help/introduction`.
    /// Anything else is URL-decoded and split on the first `/`. Without a
    /// `/` the type is empty and the whole value is the slug, so the page is
    /// looked up directly below `Docs/<lang>/`.
    ///
    /// ```
    /// use helpdocs_help::ModulePage;
    ///
    /// let page = ModulePage::parse(Some("Dev%2Fhooks"));
    /// assert_eq!((page.doc_type.as_str(), page.slug.as_str()), ("Dev", "hooks"));
    /// ```
    #[must_use]
    pub fn parse(page: Option<&str>) -> Self {
        let Some(raw) = page.filter(|p| *p != TABLE_OF_CONTENTS) else {
            return Self {
                doc_type: DEFAULT_DOC_TYPE.to_owned(),
                slug: INTRODUCTION.to_owned(),
            };
        };

        let decoded = url_decode(raw);
        match decoded.split_once('/') {
            Some((doc_type, slug)) => Self {
                doc_type: doc_type.to_owned(),
                slug: slug.to_owned(),
            },
            None => Self {
                doc_type: String::new(),
                slug: decoded,
            },
        }
    }
}

/// Decode a form-encoded value: `+` is a space, `%XX` is a byte.
///
/// Invalid UTF-8 after decoding is replaced rather than rejected; such slugs
/// simply match no file.
fn url_decode(raw: &str) -> String {
    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
