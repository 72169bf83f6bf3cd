//! External feed fetches for the cosmic timeline view.
//!
//! Both feeds degrade to fixed fallback values on any failure; a broken
//! third-party API must never break the page.

use serde::Deserialize;

/// Placeholder shown when space imagery cannot be fetched.
pub const FALLBACK_IMAGE: &str = "https://placehold.co/400x600?text=Cosmic+Memory";

/// Joke shown when the joke API cannot be reached.
pub const FALLBACK_JOKE: &str = "The dad joke got lost on the way here.";

const APOD_URL: &str = "https://api.nasa.gov/planetary/apod";
const JOKE_URL: &str = "https://icanhazdadjoke.com/";

/// One card on the cosmic timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosmicCard {
    pub title: String,
    pub date: String,
    pub image: String,
}

#[derive(Debug, Deserialize)]
struct ApodResponse {
    title: Option<String>,
    date: Option<String>,
    media_type: Option<String>,
    url: Option<String>,
    hdurl: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JokeResponse {
    joke: Option<String>,
}

/// Fetch the NASA picture-of-the-day for a date (`YYYY-MM-DD`).
pub async fn fetch_apod(http: &reqwest::Client, api_key: &str, date: &str) -> CosmicCard {
    match try_fetch_apod(http, api_key, date).await {
        Ok(card) => card,
        Err(e) => {
            tracing::debug!("APOD fetch failed, using fallback: {e}");
            CosmicCard {
                title: "Cosmic Memory".into(),
                date: date.to_string(),
                image: FALLBACK_IMAGE.into(),
            }
        }
    }
}

async fn try_fetch_apod(
    http: &reqwest::Client,
    api_key: &str,
    date: &str,
) -> Result<CosmicCard, reqwest::Error> {
    let resp = http
        .get(APOD_URL)
        .query(&[("api_key", api_key), ("date", date)])
        .send()
        .await?
        .error_for_status()?;
    let body: ApodResponse = resp.json().await?;

    // Only image media carries a usable URL; video days fall back.
    let image = match body.media_type.as_deref() {
        Some("image") => body.hdurl.or(body.url),
        _ => None,
    };

    Ok(CosmicCard {
        title: body.title.unwrap_or_else(|| "Cosmic Memory".into()),
        date: body.date.unwrap_or_else(|| date.to_string()),
        image: image.unwrap_or_else(|| FALLBACK_IMAGE.into()),
    })
}

/// Fetch a dad joke, falling back to [`FALLBACK_JOKE`].
pub async fn fetch_dad_joke(http: &reqwest::Client) -> String {
    let result: Result<JokeResponse, reqwest::Error> = async {
        http.get(JOKE_URL)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
    .await;

    match result {
        Ok(body) => body.joke.unwrap_or_else(|| FALLBACK_JOKE.into()),
        Err(e) => {
            tracing::debug!("Joke fetch failed, using fallback: {e}");
            FALLBACK_JOKE.into()
        }
    }
}
