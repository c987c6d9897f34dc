//! Print a single post

use anyhow::Result;

use crate::content::ContentLoader;
use crate::views::Views;
use crate::Reader;

/// Render one post to HTML on stdout. Unknown identifiers are an error.
pub async fn run(reader: &Reader, path: &str, full_page: bool) -> Result<()> {
    let manifest = reader.source.read_async().await?;
    let post = ContentLoader::new(&manifest).load_post(path)?;

    let views = Views::new(reader.config.clone());
    if full_page {
        println!("{}", views.detail(&post));
    } else {
        println!("{}", views.render_body(&post));
    }
    Ok(())
}
