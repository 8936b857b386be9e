//! Precipitation ordering for the site list.

use std::cmp::Ordering;

use fieldwatch_store::Site;
use fieldwatch_sync::WeatherCache;

/// Order sites wettest-first against a cache snapshot.
///
/// Pure in both inputs: callers recompute on any change to either the
/// list or the cache. Sites without a measurement (fetch failed or not
/// yet attempted) sort after all measured sites; name breaks ties.
pub fn sort_by_precipitation(sites: &[Site], cache: &WeatherCache) -> Vec<Site> {
    let mut sorted = sites.to_vec();
    sorted.sort_by(|a, b| {
        let pa = cache.record(&a.id).map(|r| r.precip_24h_in);
        let pb = cache.record(&b.id).map(|r| r.precip_24h_in);
        match (pa, pb) {
            (Some(x), Some(y)) => y
                .partial_cmp(&x)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        }
    });
    sorted
}
