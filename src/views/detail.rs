//! Single post page

use chrono::{DateTime, Utc};

use crate::content::PostDetail;
use crate::helpers::TimeSince;

/// A post page rendered in two phases.
///
/// The first render has no "time since published" value. It is computed
/// once by [`DetailView::mount`] from the clock at display time and then
/// stays fixed.
#[derive(Debug, Clone)]
pub struct DetailView {
    post: PostDetail,
    time_since: Option<String>,
}

impl DetailView {
    pub fn new(post: PostDetail) -> Self {
        Self {
            post,
            time_since: None,
        }
    }

    pub fn post(&self) -> &PostDetail {
        &self.post
    }

    pub fn is_mounted(&self) -> bool {
        self.time_since.is_some()
    }

    /// Compute the elapsed-time label. Only the first call has an effect.
    pub fn mount(&mut self, now: DateTime<Utc>) {
        if self.time_since.is_some() {
            return;
        }
        let label = self
            .post
            .publication_date
            .map(|published| TimeSince::between(published, now).to_string())
            .unwrap_or_default();
        self.time_since = Some(label);
    }

    /// Label for the time chip; empty before mount
    pub fn time_since(&self) -> &str {
        self.time_since.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn detail(published: Option<DateTime<Utc>>) -> PostDetail {
        PostDetail {
            slug: "hooks".to_string(),
            title: "Como utilizar Hooks".to_string(),
            subtitle: String::new(),
            author: "Joseph Oliveira".to_string(),
            banner: None,
            content: Vec::new(),
            updated_at: String::new(),
            publication_date: published,
        }
    }

    #[test]
    fn test_first_render_is_blank() {
        let view = DetailView::new(detail(Some(Utc::now())));
        assert!(!view.is_mounted());
        assert_eq!(view.time_since(), "");
    }

    #[test]
    fn test_mount_computes_once() {
        let published = Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap();
        let mut view = DetailView::new(detail(Some(published)));

        view.mount(published + Duration::minutes(6));
        assert_eq!(view.time_since(), "6 minutos");

        view.mount(published + Duration::hours(49));
        assert_eq!(view.time_since(), "6 minutos");
    }

    #[test]
    fn test_mount_without_publication_date() {
        let mut view = DetailView::new(detail(None));
        view.mount(Utc::now());
        assert!(view.is_mounted());
        assert_eq!(view.time_since(), "");
    }
}
