pub mod insight_cache;
