//! Item image naming, loading and decoding.

use std::collections::HashMap;
use std::future::Future;
use std::pin::pin;

use futures::future::{Either, select};
use futures::stream::{FuturesUnordered, StreamExt};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tiny_skia::Pixmap;

use crate::constants::MAX_TILE_ITEMS;
use crate::error::{RenderError, Result};
use crate::models::BingoTile;
use crate::surface::pixmap_from_rgba;

const WIKI_THUMB_BASE: &str = "https://oldschool.runescape.wiki/images/thumb/";

// Characters wiki file names keep as-is.
const FILE_NAME_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'.')
    .remove(b'(')
    .remove(b')')
    .remove(b'\'');

/// Wiki file stem for an item: first word capitalized, the rest lower-cased,
/// words joined with underscores ("Dragon Warhammer" -> "Dragon_warhammer").
pub fn item_image_stem(item: &str) -> String {
    item.split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            } else {
                word.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join("_")
}

pub fn item_image_file_name(item: &str) -> String {
    format!("{}_detail.png", item_image_stem(item))
}

/// Thumbnail URL of an item's detail image on the wiki CDN.
pub fn item_image_url(item: &str) -> String {
    let stem = utf8_percent_encode(&item_image_stem(item), FILE_NAME_SAFE).to_string();
    format!("{WIKI_THUMB_BASE}{stem}_detail.png/1280px-{stem}_detail.png")
}

/// Where item image bytes come from (network, disk, memory).
pub trait ImageSource {
    fn fetch(&self, item: &str) -> impl Future<Output = Result<Vec<u8>>>;
}

/// Decoded item bitmap.
pub struct ItemImage {
    pub pixmap: Pixmap,
}

impl ItemImage {
    pub fn natural_size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Fully decoded with real pixels; the only state that may be drawn.
    pub fn is_drawable(&self) -> bool {
        let (w, h) = self.natural_size();
        w > 0 && h > 0
    }
}

pub fn decode_image(bytes: &[u8]) -> Result<Pixmap> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = rgba.dimensions();
    pixmap_from_rgba(w, h, rgba.as_raw()).ok_or(RenderError::EmptyImage)
}

/// Images loaded for one render pass.
#[derive(Default)]
pub struct ImageCache {
    images: HashMap<String, ItemImage>,
    missing: Vec<String>,
}

impl ImageCache {
    pub fn get(&self, item: &str) -> Option<&ItemImage> {
        self.images.get(item)
    }

    pub fn insert(&mut self, item: impl Into<String>, pixmap: Pixmap) {
        self.images.insert(item.into(), ItemImage { pixmap });
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Items that failed to fetch or decode, or did not settle in time. Sorted.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    fn mark_missing(&mut self, item: String) {
        if let Err(pos) = self.missing.binary_search(&item) {
            self.missing.insert(pos, item);
        }
    }
}

/// Distinct items drawn on the board, in first-seen order.
pub fn board_items(board: &[BingoTile]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for tile in board {
        for item in tile.items.iter().take(MAX_TILE_ITEMS) {
            if !seen.contains(item) {
                seen.push(item.clone());
            }
        }
    }
    seen
}

/// Fetch and decode every item image on the board.
///
/// All fetches are issued together and collected as they settle. When
/// `deadline` completes first, the unsettled items count as failed. Pass
/// `futures::future::pending()` to wait for every fetch.
pub async fn load_tile_images<S, D>(board: &[BingoTile], source: &S, deadline: D) -> ImageCache
where
    S: ImageSource + ?Sized,
    D: Future<Output = ()>,
{
    let items = board_items(board);
    let mut cache = ImageCache::default();
    let mut pending: FuturesUnordered<_> = items
        .iter()
        .map(|item| async move { (item, source.fetch(item).await) })
        .collect();
    let mut settled: Vec<&String> = Vec::with_capacity(items.len());
    let mut deadline = pin!(deadline);

    loop {
        match select(pending.next(), deadline.as_mut()).await {
            Either::Left((Some((item, fetched)), _)) => {
                settled.push(item);
                match fetched.and_then(|bytes| decode_image(&bytes)) {
                    Ok(pixmap) => cache.insert(item.clone(), pixmap),
                    Err(e) => {
                        log::warn!("item image '{item}' unavailable: {e}");
                        cache.mark_missing(item.clone());
                    }
                }
            }
            Either::Left((None, _)) => break,
            Either::Right(((), _)) => {
                for item in items.iter().filter(|i| !settled.contains(i)) {
                    log::warn!("item image '{item}' did not load before the deadline");
                    cache.mark_missing(item.clone());
                }
                break;
            }
        }
    }
    cache
}
