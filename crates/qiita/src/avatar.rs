use std::sync::Arc;

use log::warn;
use qiita_core::avatar::decode_avatar_or_placeholder;
use qiita_core::presenter::AvatarRequest;
use tokio::sync::mpsc::UnboundedSender;

use crate::coordinator::Completion;
use crate::fetcher::ImageFetcher;

/// Loads author avatars in the background, one task per bound row.
///
/// There is no shared cache and no de-duplication: two rows with the same
/// author fetch the image twice. Whether a finished load is still wanted is
/// decided by the presenter from the request token.
pub struct AvatarLoader<I> {
    images: Arc<I>,
    completions: UnboundedSender<Completion>,
}

impl<I: ImageFetcher> AvatarLoader<I> {
    pub fn new(images: Arc<I>, completions: UnboundedSender<Completion>) -> Self {
        Self {
            images,
            completions,
        }
    }

    /// Start loading the avatar for a row. Transport failures are logged and
    /// otherwise ignored; the row keeps showing its placeholder.
    pub fn load(&self, request: AvatarRequest) {
        let images = Arc::clone(&self.images);
        let completions = self.completions.clone();

        tokio::spawn(async move {
            let AvatarRequest { row, token, url } = request;

            match images.fetch_image(&url).await {
                Ok(bytes) => {
                    let _ = completions.send(Completion::Avatar {
                        row,
                        token,
                        avatar: decode_avatar_or_placeholder(&bytes),
                    });
                }
                Err(err) => warn!("Failed to load image {url}: {err}"),
            }
        });
    }
}
