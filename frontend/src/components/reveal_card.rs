use yew::prelude::*;

use crate::reveal::{use_reveal, RevealEffect};

#[derive(Properties, PartialEq)]
pub struct RevealCardProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Fades and slides its children in the first time it scrolls into view.
#[function_component(RevealCard)]
pub fn reveal_card(props: &RevealCardProps) -> Html {
    let reveal = use_reveal(RevealEffect::Reveal);

    html! {
        <div ref={reveal.node} class={classes!("reveal", props.class.clone(), reveal.visible.then(|| "visible"))}>
            { for props.children.iter() }
        </div>
    }
}
