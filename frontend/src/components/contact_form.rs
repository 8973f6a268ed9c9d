use log::{info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;
use crate::lead::channel::{HttpIntake, WindowMailClient};
use crate::lead::error::LeadError;
use crate::lead::pipeline::{settle, SubmissionOutcome};
use crate::lead::{Delivery, LeadField, SubmissionPipeline, SubmissionState};

const ACTIVITIES: [&str; 5] = ["Заказчик", "Генподрядчик", "Подрядчик", "Технадзор", "Другое"];

fn placeholder(field: LeadField) -> &'static str {
    match field {
        LeadField::Organization => "ООО «Стройка»",
        LeadField::ContactName => "Иванов Иван Иванович",
        LeadField::Phone => "+7 (___) ___-__-__",
        LeadField::City => "Москва",
        LeadField::Activity => "Выберите вид деятельности",
        LeadField::Message => "Расскажите о ваших объектах",
    }
}

fn input_type(field: LeadField) -> &'static str {
    match field {
        LeadField::Phone => "tel",
        _ => "text",
    }
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let pipeline = use_mut_ref(SubmissionPipeline::new);
    let missing = use_state(Vec::<LeadField>::new);
    let delivery = use_state(|| None::<Delivery>);
    let update = use_force_update();

    let on_edit = |field: LeadField| {
        let pipeline = pipeline.clone();
        let missing = missing.clone();
        let update = update.clone();
        Callback::from(move |value: String| {
            pipeline.borrow_mut().edit(field, value);
            if missing.contains(&field) {
                missing.set(missing.iter().copied().filter(|f| *f != field).collect());
            }
            update.force_update();
        })
    };

    let onsubmit = {
        let pipeline = pipeline.clone();
        let missing = missing.clone();
        let delivery = delivery.clone();
        let update = update.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let begun = pipeline.borrow_mut().begin();
            match begun {
                Ok(draft) => {
                    missing.set(Vec::new());
                    update.force_update();
                    let pipeline = pipeline.clone();
                    let delivery = delivery.clone();
                    let update = update.clone();
                    spawn_local(async move {
                        let outcome = settle(
                            &pipeline,
                            draft,
                            &HttpIntake::default(),
                            &WindowMailClient,
                            config::LEAD_RECIPIENT,
                        )
                        .await;
                        info!("Lead submission finished: {:?}", outcome);
                        if let SubmissionOutcome::Submitted(sent) = outcome {
                            delivery.set(Some(sent));
                        }
                        update.force_update();
                    });
                }
                Err(LeadError::Validation { missing: fields }) => {
                    warn!("Lead form rejected: {}", LeadError::Validation { missing: fields.clone() });
                    missing.set(fields);
                }
                Err(e) => info!("Ignoring submit: {}", e),
            }
        })
    };

    let on_reset = {
        let pipeline = pipeline.clone();
        let delivery = delivery.clone();
        let update = update.clone();
        Callback::from(move |_: MouseEvent| {
            if pipeline.borrow_mut().reset().is_ok() {
                delivery.set(None);
                update.force_update();
            }
        })
    };

    let state = pipeline.borrow().state();
    let draft = pipeline.borrow().draft().clone();
    let sending = state == SubmissionState::Sending;

    let field_class = |field: LeadField| classes!("form-input", missing.contains(&field).then(|| "invalid"));
    let field_error = |field: LeadField| {
        if missing.contains(&field) {
            html! { <span class="field-error">{"Заполните это поле"}</span> }
        } else {
            html! {}
        }
    };

    let text_field = |field: LeadField| {
        let on_change = on_edit(field);
        html! {
            <label class="form-field">
                <span class="form-label">{field.label()}{" *"}</span>
                <input
                    type={input_type(field)}
                    class={field_class(field)}
                    placeholder={placeholder(field)}
                    value={draft.get(field).to_string()}
                    disabled={sending}
                    oninput={Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        on_change.emit(input.value());
                    })}
                />
                {field_error(field)}
            </label>
        }
    };

    match state {
        SubmissionState::Submitted => html! {
            <div class="form-success">
                <h3>{"Спасибо! Заявка отправлена"}</h3>
                <p>{"Мы свяжемся с вами в ближайшее время."}</p>
                if *delivery == Some(Delivery::Fallback) {
                    <p class="form-note">
                        {"Мы открыли ваш почтовый клиент с готовым письмом. Если письмо не ушло, напишите нам на "}
                        <a href={format!("mailto:{}", config::LEAD_RECIPIENT)}>{config::LEAD_RECIPIENT}</a>
                    </p>
                }
                <button class="form-secondary" onclick={on_reset}>{"Отправить ещё одну заявку"}</button>
            </div>
        },
        SubmissionState::Failed => html! {
            <div class="form-error-banner">
                {"Не удалось отправить заявку. Позвоните нам: "}
                <a href={config::CONTACT_PHONE_HREF}>{config::CONTACT_PHONE}</a>
            </div>
        },
        SubmissionState::Idle | SubmissionState::Sending => {
            let on_activity = on_edit(LeadField::Activity);
            let on_message = on_edit(LeadField::Message);
            html! {
                <form class="contact-form" {onsubmit}>
                    <div class="form-grid">
                        {text_field(LeadField::Organization)}
                        {text_field(LeadField::ContactName)}
                        {text_field(LeadField::Phone)}
                        {text_field(LeadField::City)}
                    </div>
                    <label class="form-field">
                        <span class="form-label">{LeadField::Activity.label()}{" *"}</span>
                        <select
                            class={field_class(LeadField::Activity)}
                            disabled={sending}
                            onchange={Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                on_activity.emit(select.value());
                            })}
                        >
                            <option value="" selected={draft.activity.is_empty()}>
                                {placeholder(LeadField::Activity)}
                            </option>
                            { for ACTIVITIES.iter().map(|activity| html! {
                                <option value={*activity} selected={draft.activity == *activity}>{*activity}</option>
                            }) }
                        </select>
                        {field_error(LeadField::Activity)}
                    </label>
                    <label class="form-field">
                        <span class="form-label">{LeadField::Message.label()}</span>
                        <textarea
                            class="form-input"
                            rows="5"
                            placeholder={placeholder(LeadField::Message)}
                            value={draft.message.clone()}
                            disabled={sending}
                            oninput={Callback::from(move |e: InputEvent| {
                                let input: HtmlTextAreaElement = e.target_unchecked_into();
                                on_message.emit(input.value());
                            })}
                        />
                    </label>
                    <button type="submit" class="form-submit" disabled={sending}>
                        { if sending { "Отправка..." } else { "Отправить заявку" } }
                    </button>
                </form>
            }
        }
    }
}
