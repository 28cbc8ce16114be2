//! Dynamic content loader
//!
//! Many storefronts reveal product links only through infinite scroll.
//! [`settle_page`] drives a rendered page forward until scrolling stops
//! producing new content, then returns control so link extraction sees
//! the full page.

use crate::render::RenderPage;
use std::time::Duration;
use tokio::time::Instant;

/// Pixels scrolled per tick
const SCROLL_STEP_PX: f64 = 100.0;

/// Pause between scroll ticks
const SCROLL_TICK: Duration = Duration::from_millis(500);

/// Pause at the bottom before re-measuring the content height
const BOTTOM_PAUSE: Duration = Duration::from_millis(500);

/// Hard bound on total settle time for one page
const MAX_SETTLE_TIME: Duration = Duration::from_secs(60);

/// Scrolls a page until its content height stops growing
///
/// Algorithm: scroll forward by a fixed step on a fixed tick, accumulating
/// the distance scrolled. Once the accumulated distance reaches the current
/// content height, pause briefly and re-measure; an unchanged height means
/// the page has settled, a grown height resets the accumulator and the
/// loop continues.
///
/// Best-effort: any page interaction error is logged and treated
/// as "settling complete" rather than propagated, so a page that cannot be
/// scrolled still yields whatever links are already rendered. The same
/// applies when [`MAX_SETTLE_TIME`] elapses.
pub async fn settle_page(page: &dyn RenderPage) {
    if let Err(e) = settle_inner(page).await {
        tracing::warn!("Error while settling page, extracting as-is: {}", e);
    }
}

async fn settle_inner(page: &dyn RenderPage) -> crate::RenderResult<()> {
    let started = Instant::now();
    let mut scrolled = 0.0_f64;
    let mut height = page.content_height().await?;

    loop {
        if started.elapsed() >= MAX_SETTLE_TIME {
            tracing::warn!(
                "Page did not settle within {:?}, extracting as-is",
                MAX_SETTLE_TIME
            );
            return Ok(());
        }

        page.scroll_by(SCROLL_STEP_PX).await?;
        scrolled += SCROLL_STEP_PX;
        tokio::time::sleep(SCROLL_TICK).await;

        if scrolled >= height {
            // Reached the bottom; give lazy loaders a moment, then check
            // whether anything new appeared.
            tokio::time::sleep(BOTTOM_PAUSE).await;
            let new_height = page.content_height().await?;

            if (new_height - height).abs() < f64::EPSILON {
                tracing::debug!("Page settled at content height {}", height);
                return Ok(());
            }

            tracing::trace!("Content height grew {} -> {}", height, new_height);
            height = new_height;
            scrolled = 0.0;
        }
    }
}
