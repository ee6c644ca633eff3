use url::Url;

use crate::error::PanelError;
use crate::panel::EntityContext;

fn build_entity_url(base: &Url, token: &str, action: &str) -> Result<Url, PanelError> {
    Ok(base.join(&format!("api/{token}/{action}"))?)
}

/// Resolved URLs of one entity kind's REST surface.
#[derive(Debug, Clone)]
pub struct EntityEndpoints {
    count: Url,
    search: Url,
    add: Url,
    list: Url,
    download: Url,
    delete: Url,
    update: Url,
}

impl EntityEndpoints {
    /// `base` is the site origin, optionally with a path prefix ending in `/`.
    pub fn new(base: &Url, ctx: &EntityContext) -> Result<Self, PanelError> {
        let token = ctx.token();
        Ok(Self {
            count: build_entity_url(base, token, "count")?,
            search: build_entity_url(base, token, "search")?,
            add: build_entity_url(base, token, "add")?,
            list: build_entity_url(base, token, "list")?,
            download: build_entity_url(base, token, "download")?,
            delete: build_entity_url(base, token, "delete")?,
            update: build_entity_url(base, token, "update")?,
        })
    }

    pub fn count(&self) -> &Url {
        &self.count
    }

    pub fn search(&self) -> &Url {
        &self.search
    }

    pub fn add(&self) -> &Url {
        &self.add
    }

    pub fn list(&self) -> &Url {
        &self.list
    }

    pub fn download(&self) -> &Url {
        &self.download
    }

    /// `/api/{type}/delete/{id}`, with `id` percent-encoded as one segment.
    pub fn delete(&self, id: &str) -> Result<Url, PanelError> {
        with_segment(&self.delete, id)
    }

    /// `/api/{type}/update/{id}`
    pub fn update(&self, id: &str) -> Result<Url, PanelError> {
        with_segment(&self.update, id)
    }
}

fn with_segment(base: &Url, segment: &str) -> Result<Url, PanelError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .push(segment);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(base: &str) -> EntityEndpoints {
        let ctx = EntityContext::new("participants", "Participant").unwrap();
        EntityEndpoints::new(&Url::parse(base).unwrap(), &ctx).unwrap()
    }

    #[test]
    fn builds_api_paths_under_base() {
        let eps = endpoints("http://localhost:5000/");
        assert_eq!(eps.count().as_str(), "http://localhost:5000/api/participants/count");
        assert_eq!(eps.search().as_str(), "http://localhost:5000/api/participants/search");
        assert_eq!(eps.list().as_str(), "http://localhost:5000/api/participants/list");
    }

    #[test]
    fn keeps_path_prefix() {
        let eps = endpoints("https://example.test/directory/");
        assert_eq!(eps.add().as_str(), "https://example.test/directory/api/participants/add");
    }

    #[test]
    fn id_is_encoded_as_single_segment() {
        let eps = endpoints("http://localhost:5000/");
        assert_eq!(
            eps.delete("65a/b c").unwrap().as_str(),
            "http://localhost:5000/api/participants/delete/65a%2Fb%20c"
        );
        assert_eq!(
            eps.update("42").unwrap().as_str(),
            "http://localhost:5000/api/participants/update/42"
        );
    }
}
