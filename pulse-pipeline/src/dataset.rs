//! Delimited-file input and output for post tables

use csv::{ReaderBuilder, Writer};
use pulse_types::{Post, RawPost};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;

/// Read raw post rows from any reader with a header line
pub fn read_posts<R: Read>(reader: R) -> Result<Vec<RawPost>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut posts = Vec::new();

    for result in reader.deserialize() {
        let post: RawPost = result?;
        posts.push(post);
    }

    Ok(posts)
}

/// Load raw post rows from a CSV file
pub fn load_posts<P: AsRef<Path>>(path: P) -> Result<Vec<RawPost>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let posts = read_posts(file)?;

    tracing::info!("Loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}

/// Write cleaned posts, including the `text_clean` column
pub fn write_posts<W: Write>(posts: &[Post], writer: W) -> Result<()> {
    let mut writer = Writer::from_writer(writer);

    for post in posts {
        writer.serialize(post)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save cleaned posts to a CSV file, creating parent directories
pub fn save_posts<P: AsRef<Path>>(posts: &[Post], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    write_posts(posts, File::create(path)?)?;

    tracing::info!("Saved {} cleaned posts to {}", posts.len(), path.display());
    Ok(())
}
