//! Catalog URL construction.

use url::Url;

use super::CatalogError;

/// Base URL plus API key; builds the four request URLs.
#[derive(Debug, Clone)]
pub struct CatalogEndpoints {
    base: String,
    api_key: String,
}

impl CatalogEndpoints {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, CatalogError> {
        let base = base_url.trim_end_matches('/').to_string();
        // Validate once so later builds only fail on truly odd input.
        Url::parse(&base)?;
        Ok(Self {
            base,
            api_key: api_key.to_string(),
        })
    }

    /// `GET {base}/search/movie?api_key=..&query=..` with the query escaped.
    pub fn search(&self, query: &str) -> Result<Url, CatalogError> {
        let mut url = self.build("/search/movie")?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }

    pub fn details(&self, id: u64) -> Result<Url, CatalogError> {
        self.build(&Self::details_path(id))
    }

    pub fn credits(&self, id: u64) -> Result<Url, CatalogError> {
        self.build(&Self::credits_path(id))
    }

    pub fn videos(&self, id: u64) -> Result<Url, CatalogError> {
        self.build(&Self::videos_path(id))
    }

    pub(crate) fn details_path(id: u64) -> String {
        format!("/movie/{id}")
    }

    pub(crate) fn credits_path(id: u64) -> String {
        format!("/movie/{id}/credits")
    }

    pub(crate) fn videos_path(id: u64) -> String {
        format!("/movie/{id}/videos")
    }

    fn build(&self, path: &str) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&format!("{}{}", self.base, path))?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> CatalogEndpoints {
        CatalogEndpoints::new("https://api.themoviedb.org/3/", "KEY").unwrap()
    }

    #[test]
    fn search_escapes_query_and_appends_key() {
        let url = endpoints().search("Dune & Alien/2").unwrap();
        assert_eq!(url.path(), "/3/search/movie");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("api_key".to_string(), "KEY".to_string()),
                ("query".to_string(), "Dune & Alien/2".to_string()),
            ]
        );
        assert!(!url.as_str().contains(" & "));
    }

    #[test]
    fn per_movie_paths() {
        let e = endpoints();
        assert_eq!(e.details(42).unwrap().path(), "/3/movie/42");
        assert_eq!(e.credits(42).unwrap().path(), "/3/movie/42/credits");
        assert_eq!(e.videos(42).unwrap().path(), "/3/movie/42/videos");
        assert_eq!(e.videos(42).unwrap().query(), Some("api_key=KEY"));
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(matches!(
            CatalogEndpoints::new("not a url", "k"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }
}
