//! Shared constants used across the application.

/// CDN host whose URLs are treated as images even without a known extension.
pub const DISCORD_CDN_HOST: &str = "cdn.discordapp.com";

/// Path prefix under which Supabase serves public storage objects.
pub const SUPABASE_PUBLIC_STORAGE_PATH: &str = "/storage/v1/object/public/";

/// Message shown when a failed highlight query carries no message of its own.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch highlights";

/// User agent string sent with store and media proxy requests.
pub const USER_AGENT: &str = concat!("highlight-gallery/", env!("CARGO_PKG_VERSION"));

/// Largest image the media proxy will relay unless `MEDIA_MAX_BYTES` says otherwise.
pub const DEFAULT_MEDIA_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Video file suffixes.
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".webm", ".mkv"];

/// Image file suffixes.
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif"];

/// Line shown under the site title.
pub const SITE_TAGLINE: &str = "Upload Picture, Video For MEMORYYY";

/// Hint shown under the error banner when the highlight query fails.
pub const STORE_ERROR_HINT: &str = "Please check your Supabase configuration and RLS policies.";
