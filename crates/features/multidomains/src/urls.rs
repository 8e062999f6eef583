//! Named route tables and the resolver seam used by cross-domain reversal.

use chamber_domain::config::RoutesConfig;
use fxhash::{FxHashMap, FxHashSet};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Arguments forwarded untouched to the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveArgs {
    pub args: Vec<String>,
    pub kwargs: Vec<(String, String)>,
}

impl ResolveArgs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}

/// Turns a route name into a path within one urlconf.
pub trait UrlResolver {
    type Error: std::error::Error + 'static;

    /// # Errors
    /// Implementation defined; [`reverse`](crate::SiteContext::reverse) passes it on as is.
    fn resolve(&self, urlconf: &str, name: &str, args: &ResolveArgs)
    -> Result<String, Self::Error>;
}

impl<R: UrlResolver + ?Sized> UrlResolver for &R {
    type Error = R::Error;

    fn resolve(
        &self,
        urlconf: &str,
        name: &str,
        args: &ResolveArgs,
    ) -> Result<String, Self::Error> {
        (**self).resolve(urlconf, name, args)
    }
}

#[chamber_derive::chamber_error]
pub enum UrlconfError {
    #[error("Unknown urlconf '{urlconf}'{}", format_context(.context))]
    UnknownUrlconf { urlconf: String, context: Option<Cow<'static, str>> },

    #[error("Reverse for '{name}' in '{urlconf}' failed{}: {message}", format_context(.context))]
    NoReverseMatch {
        name: String,
        urlconf: String,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Invalid route '{name}'{}: {message}", format_context(.context))]
    InvalidRoute { name: String, message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Path template such as `/users/{pk}/edit/`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    fn parse(name: &str, raw: &str) -> Result<Self, UrlconfError> {
        let invalid = |message: String| UrlconfError::InvalidRoute {
            name: name.to_owned(),
            message: message.into(),
            context: Some(raw.to_owned().into()),
        };

        let mut segments = Vec::new();
        let mut seen = FxHashSet::default();
        let mut rest = raw;

        while let Some(open) = rest.find(['{', '}']) {
            if rest[open..].starts_with('}') {
                return Err(invalid("unmatched '}'".to_owned()));
            }
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_owned()));
            }
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| invalid("unclosed '{'".to_owned()))?;
            let param = &after[..close];
            if param.is_empty() || !param.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(invalid(format!("bad parameter name '{param}'")));
            }
            if !seen.insert(param) {
                return Err(invalid(format!("parameter '{param}' appears twice")));
            }
            segments.push(Segment::Param(param.to_owned()));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }

        Ok(Self { raw: raw.to_owned(), segments })
    }

    fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(p) => Some(p.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fills placeholders with percent-encoded values.
    fn fill(&self, args: &ResolveArgs) -> Result<String, Cow<'static, str>> {
        if !args.args.is_empty() && !args.kwargs.is_empty() {
            return Err("positional and keyword arguments cannot be mixed".into());
        }

        let expected = self.params().count();
        let values: FxHashMap<&str, &str> = if args.kwargs.is_empty() {
            if args.args.len() != expected {
                return Err(
                    format!("expected {expected} arguments, got {}", args.args.len()).into()
                );
            }
            self.params().zip(args.args.iter().map(String::as_str)).collect()
        } else {
            let given: FxHashMap<&str, &str> =
                args.kwargs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            if given.len() != args.kwargs.len()
                || given.len() != expected
                || !self.params().all(|p| given.contains_key(p))
            {
                let mut names: Vec<&str> = args.kwargs.iter().map(|(k, _)| k.as_str()).collect();
                names.sort_unstable();
                return Err(format!("keyword arguments {names:?} do not match '{}'", self.raw)
                    .into());
            }
            given
        };

        let mut path = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(param) => path.push_str(&urlencoding::encode(values[param.as_str()])),
            }
        }
        Ok(path)
    }
}

/// Named routes of one urlconf.
#[derive(Debug, Clone)]
pub struct RouteTable {
    urlconf: String,
    routes: FxHashMap<String, PathTemplate>,
}

impl RouteTable {
    pub fn new(urlconf: impl Into<String>) -> Self {
        Self { urlconf: urlconf.into(), routes: FxHashMap::default() }
    }

    /// Adds a named route. Placeholders use `{name}` syntax.
    ///
    /// # Errors
    /// Returns [`UrlconfError::InvalidRoute`] for malformed templates.
    pub fn route(mut self, name: impl Into<String>, template: &str) -> Result<Self, UrlconfError> {
        let name = name.into();
        let parsed = PathTemplate::parse(&name, template)?;
        self.routes.insert(name, parsed);
        Ok(self)
    }

    /// # Errors
    /// Returns [`UrlconfError::InvalidRoute`] for malformed templates.
    pub fn from_routes(urlconf: impl Into<String>, routes: &RoutesConfig) -> Result<Self, UrlconfError> {
        routes.iter().try_fold(Self::new(urlconf), |table, (name, template)| table.route(name, template))
    }

    #[must_use]
    pub fn urlconf(&self) -> &str {
        &self.urlconf
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Builds the path of route `name`.
    ///
    /// # Errors
    /// Returns [`UrlconfError::NoReverseMatch`] for unknown names or mismatched arguments.
    pub fn reverse(&self, name: &str, args: &ResolveArgs) -> Result<String, UrlconfError> {
        let no_match = |message: Cow<'static, str>| UrlconfError::NoReverseMatch {
            name: name.to_owned(),
            urlconf: self.urlconf.clone(),
            message,
            context: None,
        };

        let template = self.routes.get(name).ok_or_else(|| no_match("no such route".into()))?;
        template.fill(args).map_err(no_match)
    }
}

/// Every route table of the application, keyed by urlconf reference.
#[derive(Debug, Clone, Default)]
pub struct UrlConfs {
    tables: Arc<FxHashMap<String, RouteTable>>,
}

impl UrlConfs {
    pub fn new(tables: impl IntoIterator<Item = RouteTable>) -> Self {
        let tables = tables.into_iter().map(|t| (t.urlconf.clone(), t)).collect();
        Self { tables: Arc::new(tables) }
    }

    /// # Errors
    /// Returns [`UrlconfError::InvalidRoute`] for malformed templates.
    pub fn from_config(urlconfs: &BTreeMap<String, RoutesConfig>) -> Result<Self, UrlconfError> {
        let tables = urlconfs
            .iter()
            .map(|(urlconf, routes)| RouteTable::from_routes(urlconf, routes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tables))
    }

    #[must_use]
    pub fn get(&self, urlconf: &str) -> Option<&RouteTable> {
        self.tables.get(urlconf)
    }
}

impl UrlResolver for UrlConfs {
    type Error = UrlconfError;

    fn resolve(
        &self,
        urlconf: &str,
        name: &str,
        args: &ResolveArgs,
    ) -> Result<String, Self::Error> {
        let table = self
            .get(urlconf)
            .ok_or_else(|| UrlconfError::UnknownUrlconf { urlconf: urlconf.to_owned(), context: None })?;
        let path = table.reverse(name, args)?;
        trace!(urlconf, name, %path, "Resolved route");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new("dj.backend_urls")
            .route("current-datetime", "/current_time_backend/")
            .and_then(|t| t.route("user-detail", "/users/{pk}/"))
            .and_then(|t| t.route("user-file", "/users/{pk}/files/{file_name}"))
            .unwrap()
    }

    fn positional(values: &[&str]) -> ResolveArgs {
        ResolveArgs { args: values.iter().map(|v| (*v).to_owned()).collect(), kwargs: vec![] }
    }

    fn keyword(values: &[(&str, &str)]) -> ResolveArgs {
        ResolveArgs {
            args: vec![],
            kwargs: values.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
        }
    }

    #[test]
    fn static_routes_reverse_without_args() {
        assert_eq!(
            table().reverse("current-datetime", &ResolveArgs::default()).unwrap(),
            "/current_time_backend/"
        );
    }

    #[test]
    fn positional_args_fill_in_order() {
        assert_eq!(
            table().reverse("user-file", &positional(&["7", "cv.pdf"])).unwrap(),
            "/users/7/files/cv.pdf"
        );
    }

    #[test]
    fn keyword_args_fill_by_name() {
        assert_eq!(
            table().reverse("user-file", &keyword(&[("file_name", "a b"), ("pk", "7")])).unwrap(),
            "/users/7/files/a%20b"
        );
    }

    #[test]
    fn mismatched_args_do_not_match() {
        let t = table();
        for args in [
            positional(&[]),
            positional(&["1", "2"]),
            keyword(&[("id", "1")]),
            keyword(&[("pk", "1"), ("pk", "2")]),
            ResolveArgs { args: vec!["1".to_owned()], kwargs: vec![("pk".to_owned(), "1".to_owned())] },
        ] {
            let err = t.reverse("user-detail", &args).unwrap_err();
            assert!(matches!(err, UrlconfError::NoReverseMatch { .. }), "{args:?}");
        }
    }

    #[test]
    fn unknown_route_does_not_match() {
        let err = table().reverse("missing", &ResolveArgs::default()).unwrap_err();
        assert!(err.to_string().contains("dj.backend_urls"));
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for template in ["/users/{pk", "/users/pk}/", "/users/{}/", "/a/{x}/{x}/", "/a/{x-y}/"] {
            let err = RouteTable::new("t").route("r", template).unwrap_err();
            assert!(matches!(err, UrlconfError::InvalidRoute { .. }), "{template}");
        }
    }

    #[test]
    fn resolver_reports_unknown_urlconf() {
        let confs = UrlConfs::new([table()]);
        assert_eq!(
            confs.resolve("dj.backend_urls", "user-detail", &positional(&["3"])).unwrap(),
            "/users/3/"
        );
        assert!(matches!(
            confs.resolve("dj.frontend_urls", "user-detail", &positional(&["3"])),
            Err(UrlconfError::UnknownUrlconf { .. })
        ));
    }
}
