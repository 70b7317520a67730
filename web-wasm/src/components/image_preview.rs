//! 画像表示
//!
//! ローカルファイルはオブジェクトURLを作って表示し、破棄時に解放する。

use leptos::prelude::*;
use plate_detect_common::ImageSource;
use web_sys::{File, Url};

use crate::transport::PickedFile;

fn object_url(file: &File) -> String {
    Url::create_object_url_with_blob(file)
        .inspect_err(|e| log::warn!("createObjectURL failed: {:?}", e))
        .unwrap_or_default()
}

#[component]
pub fn ImagePreview(
    source: ImageSource<PickedFile>,
    #[prop(into)] alt: String,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let src = source.resolve(|picked| object_url(picked.file()));

    if source.is_local() && !src.is_empty() {
        let url = src.clone();
        on_cleanup(move || {
            let _ = Url::revoke_object_url(&url);
        });
    }

    view! {
        <img
            class=class.unwrap_or_else(|| "image-preview".to_string())
            src=src
            alt=alt
        />
    }
}
