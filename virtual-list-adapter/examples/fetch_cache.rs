use virtual_list_adapter::{CacheConfig, TtlCache};

fn fetch_consultants(page: u32) -> Result<Vec<String>, String> {
    println!("  (fetching page {page})");
    Ok((0..3).map(|i| format!("consultant {}", page * 3 + i)).collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: deduplicate repeated fetches within a time-to-live window.
    let mut cache = TtlCache::new(CacheConfig::new(16, 30_000))?;

    for now_ms in [0u64, 1_000, 29_999, 30_000] {
        let page = cache.try_get_or_insert_with(0u32, now_ms, || fetch_consultants(0))?;
        println!("t={now_ms} page0={page:?}");
    }

    println!("purged={}", cache.purge_expired(120_000));
    Ok(())
}
