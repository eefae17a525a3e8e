use crate::models::RawVideo;
use anyhow::{anyhow, Context, Result};
use log::info;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const PAGE_SIZE: u32 = 50;
const PAGE_DELAY: Duration = Duration::from_millis(100);

async fn get_json(client: &Client, url: &str) -> Result<Value> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(anyhow!(
            "YouTube API request failed with status: {}",
            response.status()
        ));
    }
    Ok(response.json::<Value>().await?)
}

async fn uploads_playlist_id(client: &Client, api_key: &str, handle: &str) -> Result<String> {
    // Documentation: https://developers.google.com/youtube/v3/docs/channels/list
    let url = format!(
        "{API_BASE}/channels?part=contentDetails,snippet,statistics&forHandle=@{handle}&key={api_key}"
    );
    let response = get_json(client, &url)
        .await
        .with_context(|| format!("looking up channel @{handle}"))?;
    let channel = &response["items"][0];

    info!(
        "Channel: {} ({} videos reported)",
        channel["snippet"]["title"].as_str().unwrap_or("Unknown"),
        channel["statistics"]["videoCount"].as_str().unwrap_or("?")
    );

    channel["contentDetails"]["relatedPlaylists"]["uploads"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| anyhow!("Could not find uploads playlist for @{handle}"))
}

fn raw_video_from_item(item: &Value) -> Option<RawVideo> {
    let snippet = &item["snippet"];
    let video_id = item["contentDetails"]["videoId"]
        .as_str()
        .or_else(|| snippet["resourceId"]["videoId"].as_str())
        .filter(|id| !id.is_empty())?;

    Some(RawVideo {
        video_id: video_id.to_string(),
        title: snippet["title"].as_str().unwrap_or("").to_string(),
        description: snippet["description"].as_str().unwrap_or("").to_string(),
        published_at: snippet["publishedAt"].as_str().unwrap_or("").to_string(),
        thumbnail: snippet["thumbnails"]["medium"]["url"]
            .as_str()
            .or_else(|| snippet["thumbnails"]["default"]["url"].as_str())
            .unwrap_or("")
            .to_string(),
    })
}

/// Every upload of the channel, in the order the uploads playlist lists them.
pub async fn fetch_channel_videos(api_key: &str, handle: &str) -> Result<Vec<RawVideo>> {
    let client = Client::new();
    info!("Looking up channel @{handle}...");
    let playlist_id = uploads_playlist_id(&client, api_key, handle).await?;
    info!("Uploads playlist: {playlist_id}");

    let mut videos = Vec::new();
    let mut page_token: Option<String> = None;
    let mut page_count = 0;

    loop {
        // Documentation: https://developers.google.com/youtube/v3/docs/playlistItems/list
        let mut url = format!(
            "{API_BASE}/playlistItems?part=snippet,contentDetails&playlistId={playlist_id}&maxResults={PAGE_SIZE}&key={api_key}"
        );
        if let Some(token) = &page_token {
            url.push_str(&format!("&pageToken={token}"));
        }

        let response = get_json(&client, &url)
            .await
            .with_context(|| format!("fetching page {} of {playlist_id}", page_count + 1))?;
        page_count += 1;

        let items = response["items"].as_array().cloned().unwrap_or_default();
        videos.extend(items.iter().filter_map(raw_video_from_item));
        info!(
            "  Page {page_count}: fetched {} videos (total: {})",
            items.len(),
            videos.len()
        );

        page_token = response["nextPageToken"].as_str().map(String::from);
        if page_token.is_none() {
            break;
        }
        tokio::time::sleep(PAGE_DELAY).await;
    }

    info!("Total videos fetched: {}", videos.len());
    Ok(videos)
}
