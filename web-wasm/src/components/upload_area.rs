//! アップロードエリアコンポーネント

use leptos::html;
use leptos::prelude::*;
use plate_detect_common::{format_size_kb, LocalImage, Selection, UploadSelector};
use web_sys::{DragEvent, FileList, HtmlInputElement};

use crate::transport::PickedFile;

type SelectorSignal = RwSignal<UploadSelector<PickedFile>, LocalStorage>;

fn picked_files(list: FileList) -> Vec<PickedFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(PickedFile)
        .collect()
}

/// 最新の`disabled`を反映してから操作する
fn with_selector<R>(
    selector: SelectorSignal,
    disabled: Signal<bool>,
    op: impl FnOnce(&mut UploadSelector<PickedFile>) -> R,
) -> Option<R> {
    selector.try_update(|s| {
        s.set_disabled(disabled.get_untracked());
        op(s)
    })
}

#[component]
pub fn UploadArea<F>(
    #[prop(into)] disabled: Signal<bool>,
    on_files_selected: F,
) -> impl IntoView
where
    F: Fn(Vec<PickedFile>) + 'static + Clone + Send + Sync,
{
    let selector: SelectorSignal = RwSignal::new_local(UploadSelector::new());
    let input_ref = NodeRef::<html::Input>::new();

    let forward = move |selection: Option<Selection<PickedFile>>| {
        let Some(selection) = selection else {
            return;
        };
        if selection.reset_picker {
            if let Some(input) = input_ref.get_untracked() {
                input.set_value("");
            }
        }
        on_files_selected(selection.files);
    };

    let on_change = {
        let forward = forward.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            let files = input.files().map(picked_files).unwrap_or_default();
            forward(with_selector(selector, disabled, |s| s.select(files)).flatten());
        }
    };

    let on_drop = {
        let forward = forward.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            let files = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .map(picked_files)
                .unwrap_or_default();
            forward(with_selector(selector, disabled, |s| s.drop_files(files)).flatten());
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        with_selector(selector, disabled, |s| s.drag_enter());
    };

    let on_dragleave = move |_: DragEvent| {
        with_selector(selector, disabled, |s| s.drag_leave());
    };

    let on_click = move |_| {
        if disabled.get_untracked() {
            return;
        }
        // ファイル選択ダイアログを開く
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    let on_clear = {
        let forward = forward.clone();
        move |_| forward(with_selector(selector, disabled, |s| s.clear()).flatten())
    };

    let selected = move || {
        selector.with(|s| {
            s.files()
                .iter()
                .map(|f| (f.name(), format_size_kb(f.size_bytes())))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="upload-wrapper">
            <div
                class=move || {
                    let mut classes = vec!["upload-area"];
                    if selector.with(|s| s.is_dragging()) {
                        classes.push("dragover");
                    }
                    if disabled.get() {
                        classes.push("disabled");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragenter=on_dragover
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <input
                    node_ref=input_ref
                    type="file"
                    accept="image/*"
                    multiple=true
                    class="file-input"
                    style="display: none"
                    prop:disabled=move || disabled.get()
                    on:change=on_change
                />
                <div class="upload-icon">"📷"</div>
                <p>"Drag & drop images here, or click to select"</p>
                <p class="text-muted">"Supported formats: JPEG, PNG"</p>
            </div>

            {move || {
                let files = selected();
                if files.is_empty() {
                    return None;
                }
                let on_clear = on_clear.clone();
                let items = files
                    .into_iter()
                    .enumerate()
                    .map(|(index, (name, size))| {
                        let forward = forward.clone();
                        view! {
                            <li class="selected-file">
                                <span class="file-name">{name}</span>
                                <span class="file-size">{size}</span>
                                <button
                                    class="btn-remove"
                                    title="Remove"
                                    prop:disabled=move || disabled.get()
                                    on:click=move |_| {
                                        forward(
                                            with_selector(selector, disabled, |s| s.remove(index))
                                                .flatten(),
                                        )
                                    }
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    })
                    .collect_view();

                Some(view! {
                    <div class="selected-files">
                        <div class="selected-files-header">
                            <h3>"Selected Files"</h3>
                            <button
                                class="btn btn-tertiary btn-small"
                                prop:disabled=move || disabled.get()
                                on:click=on_clear
                            >
                                "Clear"
                            </button>
                        </div>
                        <ul>{items}</ul>
                    </div>
                })
            }}
        </div>
    }
}
