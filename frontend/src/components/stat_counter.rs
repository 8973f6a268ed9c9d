use yew::prelude::*;

use crate::config;
use crate::reveal::{use_reveal, CountUp, RevealEffect};

#[derive(Properties, PartialEq)]
pub struct StatCounterProps {
    pub target: u64,
    pub label: AttrValue,
    #[prop_or_default]
    pub suffix: AttrValue,
}

#[function_component(StatCounter)]
pub fn stat_counter(props: &StatCounterProps) -> Html {
    let count = CountUp::new(props.target, config::COUNT_UP_DURATION_MS, config::COUNT_UP_TICK_MS);
    let reveal = use_reveal(RevealEffect::CountUp(count));

    html! {
        <div ref={reveal.node} class={classes!("stat", "reveal", reveal.visible.then(|| "visible"))}>
            <div class="stat-value">
                {reveal.value.to_string()}{props.suffix.clone()}
            </div>
            <div class="stat-label">{props.label.clone()}</div>
        </div>
    }
}
