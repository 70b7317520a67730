use leptos::prelude::*;
use plate_detect_common::about;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="about-page">
            <h1>{about::TITLE}</h1>
            <p>{about::INTRO}</p>

            <h2>"How It Works"</h2>
            <ol>
                {about::HOW_IT_WORKS.into_iter().map(|step| view! { <li>{step}</li> }).collect_view()}
            </ol>

            <h2>"OCR Methods"</h2>
            <ul>
                {about::OCR_METHODS
                    .into_iter()
                    .map(|(method, description)| {
                        view! {
                            <li>
                                <strong>{method.label()}</strong>
                                ": "
                                {description}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <p>{about::CLOSING}</p>
        </div>
    }
}
