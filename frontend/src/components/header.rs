use web_sys::{window, MouseEvent, ScrollBehavior, ScrollIntoViewOptions};
use yew::prelude::*;
use yew_hooks::prelude::*;

pub const CONTACT_SECTION: &str = "contact";
pub const FEATURES_SECTION: &str = "features";

pub fn scroll_to_section(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[function_component(Header)]
pub fn header() -> Html {
    let menu_open = use_state(|| false);
    let (_, scroll_y) = use_window_scroll();
    let is_scrolled = scroll_y > 40.0;

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let go_to = |section: &'static str| {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(false);
            scroll_to_section(section);
        })
    };

    html! {
        <header class={classes!("top-nav", is_scrolled.then(|| "scrolled"))}>
            <div class="nav-content">
                <div class="nav-logo">
                    <span class="logo-badge">{"⛑"}</span>
                    <span class="logo-main">{"Строй контроль"}</span>
                    <span class="logo-accent">{"Имастер"}</span>
                </div>
                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={classes!("nav-right", (*menu_open).then(|| "mobile-menu-open"))}>
                    <a href={format!("#{}", FEATURES_SECTION)} class="nav-link" onclick={go_to(FEATURES_SECTION)}>
                        {"Возможности"}
                    </a>
                    <button class="nav-cta" onclick={go_to(CONTACT_SECTION)}>
                        {"Связь с нами"}
                    </button>
                </div>
            </div>
        </header>
    }
}
