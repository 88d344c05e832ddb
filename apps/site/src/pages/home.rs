use serde::Serialize;

use crate::cms_client::{ContentApi, ContentQuery, Direction, Resource};
use crate::models::{Event, Speaker};
use crate::pages::{load_collection, LoadState};

const HOME_EVENT_LIMIT: u32 = 3;
const HOME_SPEAKER_LIMIT: u32 = 4;

/// Highlights on the landing page. Each section fails on its own.
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub featured_events: LoadState<Event>,
    pub featured_speakers: LoadState<Speaker>,
}

pub fn featured_events_query() -> ContentQuery {
    ContentQuery::new()
        .filter_eq("Featured", true)
        .populate_all()
        .sort("StartDate", Direction::Asc)
        .limit(HOME_EVENT_LIMIT)
}

pub fn featured_speakers_query() -> ContentQuery {
    ContentQuery::new()
        .filter_eq("Featured", true)
        .populate_all()
        .limit(HOME_SPEAKER_LIMIT)
}

/// Fetches both sections concurrently; neither waits on the other's outcome.
pub async fn load_home(api: &dyn ContentApi, media_base: &str) -> HomePage {
    let events_query = featured_events_query();
    let speakers_query = featured_speakers_query();

    let (events, speakers) = tokio::join!(
        load_collection::<Event>(api, &events_query, media_base),
        load_collection::<Speaker>(api, &speakers_query, media_base),
    );

    HomePage {
        featured_events: LoadState::from_result(Resource::Events, events),
        featured_speakers: LoadState::from_result(Resource::Speakers, speakers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::cms_client::fake::FakeContent;

    #[tokio::test]
    async fn test_sections_fail_independently() {
        let api = FakeContent::new()
            .failing(Resource::Events, 503)
            .with(
                Resource::Speakers,
                vec![json!({"id": 1, "Name": "Ada", "Slug": "ada", "Featured": true})],
            );

        let home = load_home(&api, "http://cms").await;
        assert!(matches!(home.featured_events, LoadState::Failed { .. }));
        assert_eq!(home.featured_speakers.items().map(<[Speaker]>::len), Some(1));
    }

    #[tokio::test]
    async fn test_home_queries_are_limited() {
        let api = FakeContent::new();
        load_home(&api, "http://cms").await;
        let queries = api.queries.lock().unwrap();
        assert!(queries.iter().any(|(r, q)| *r == Resource::Events
            && q == "filters[Featured][$eq]=true&populate=*&sort[0]=StartDate:asc&pagination[limit]=3"));
        assert!(queries.iter().any(|(r, q)| *r == Resource::Speakers
            && q == "filters[Featured][$eq]=true&populate=*&pagination[limit]=4"));
    }
}
