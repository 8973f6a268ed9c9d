use chrono::Datelike;
use yew::prelude::*;

use crate::components::contact_form::ContactForm;
use crate::components::header::{scroll_to_section, Header, CONTACT_SECTION, FEATURES_SECTION};
use crate::components::reveal_card::RevealCard;
use crate::components::stat_counter::StatCounter;
use crate::config;
use crate::reveal::RevealHost;

const FEATURES: [(&str, &str, &str); 6] = [
    ("📋", "Контроль", "Лёгкий контроль для технадзора и мастера"),
    ("🔧", "Учёт материалов", "Учёт инструмента, расходников и материала"),
    ("👥", "Координация", "Лёгкая координация всех участников"),
    ("🛡", "Надзор качества", "Надзор за качеством работ"),
    ("📊", "Аналитика", "Данные и статистика проекта"),
    ("📄", "Документирование", "Ведение документации проекта"),
];

const STATS: [(u64, &str, &str); 4] = [
    (40, "%", "меньше времени на отчёты"),
    (6, "", "модулей в одном приложении"),
    (100, "%", "прозрачность работ на объекте"),
    (24, "/7", "доступ к данным объекта"),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    let host = use_memo(|_| RevealHost::new(config::REVEAL_THRESHOLD), ());

    {
        let host = host.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                move || host.disconnect()
            },
            (),
        );
    }

    let to_contact = Callback::from(|_: MouseEvent| scroll_to_section(CONTACT_SECTION));
    let to_features = Callback::from(|_: MouseEvent| scroll_to_section(FEATURES_SECTION));
    let year = chrono::Local::now().year();

    html! {
        <ContextProvider<RevealHost> context={(*host).clone()}>
        <div class="landing-page">
            <Header />
            <main>
                <section class="hero">
                    <div class="hero-content">
                        <div class="hero-badge">{"⚡ Новое приложение для строительства"}</div>
                        <h1>
                            <span class="gradient">{"Оцифруем"}</span>
                            <span class="accent">{" хаос "}</span>
                            <span class="gradient">{"на стройке"}</span>
                        </h1>
                        <p class="hero-subtitle">
                            {"Работа с ручкой и блокнотом, группами в WhatsApp или Telegram — это давно не инструмент. Мы создаём приложение, которое изменит подход к управлению строительством."}
                        </p>
                        <div class="hero-cta-group">
                            <button class="hero-cta" onclick={to_contact}>{"Принять участие →"}</button>
                            <button class="hero-secondary" onclick={to_features}>{"Узнать больше ↓"}</button>
                        </div>
                    </div>
                </section>

                <section id={FEATURES_SECTION} class="features">
                    <h2 class="section-title">{"Наши основные действия"}</h2>
                    <p class="section-subtitle">
                        {"Облегчаем процессы и делаем работу наших сотрудников спокойнее и результативнее."}
                    </p>
                    <div class="feature-grid">
                        { for FEATURES.iter().map(|(icon, title, desc)| html! {
                            <RevealCard class="feature-card">
                                <div class="feature-icon">{*icon}</div>
                                <h3>{*title}</h3>
                                <p>{*desc}</p>
                            </RevealCard>
                        }) }
                    </div>
                </section>

                <section class="stats">
                    <div class="stats-grid">
                        { for STATS.iter().map(|(target, suffix, label)| html! {
                            <StatCounter target={*target} suffix={*suffix} label={*label} />
                        }) }
                    </div>
                </section>

                <section id={CONTACT_SECTION} class="contact">
                    <h2 class="section-title">{"Свяжитесь с нами"}</h2>
                    <p class="section-subtitle">
                        {"Оставьте заявку, и мы подключим вашу компанию к пилотному запуску."}
                    </p>
                    <RevealCard class="contact-card">
                        <ContactForm />
                    </RevealCard>
                    <div class="direct-contacts">
                        <a href={format!("mailto:{}", config::LEAD_RECIPIENT)}>{"✉ "}{config::LEAD_RECIPIENT}</a>
                        <a href={config::CONTACT_PHONE_HREF}>{"☎ "}{config::CONTACT_PHONE}</a>
                        <a href={format!("https://t.me/{}", config::TELEGRAM_HANDLE.trim_start_matches('@'))}
                            target="_blank" rel="noopener noreferrer">
                            {"✈ "}{config::TELEGRAM_HANDLE}
                        </a>
                    </div>
                </section>
            </main>

            <footer class="footer">
                <div class="footer-content">
                    <span class="footer-logo">{"Строй контроль"}<span class="accent">{"Имастер"}</span></span>
                    <div class="footer-contacts">
                        <span>{"☎ "}{config::CONTACT_PHONE}</span>
                        <span>{"✉ "}{config::LEAD_RECIPIENT}</span>
                    </div>
                </div>
                <div class="footer-copy">
                    {format!("© {} СтройконтрольИмастер. Все права защищены.", year)}
                </div>
            </footer>

            <style>
                {r#"
                    .landing-page {
                        min-height: 100vh;
                        background: #fff;
                        color: #0f172a;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    }
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        right: 0;
                        z-index: 50;
                        background: #fff;
                        transition: box-shadow 0.3s ease;
                    }
                    .top-nav.scrolled {
                        box-shadow: 0 10px 25px rgba(15, 23, 42, 0.12);
                    }
                    .nav-content {
                        max-width: 1280px;
                        margin: 0 auto;
                        padding: 1rem 1.5rem;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                    }
                    .nav-logo {
                        display: flex;
                        align-items: center;
                        gap: 0.6rem;
                        font-size: 1.125rem;
                        font-weight: 800;
                    }
                    .logo-badge {
                        display: inline-flex;
                        align-items: center;
                        justify-content: center;
                        width: 2.5rem;
                        height: 2.5rem;
                        border-radius: 0.75rem;
                        background: linear-gradient(135deg, #f97316, #f59e0b);
                        color: #fff;
                    }
                    .logo-accent, .accent {
                        color: #f97316;
                    }
                    .nav-right {
                        display: flex;
                        align-items: center;
                        gap: 1.5rem;
                    }
                    .nav-link {
                        color: #334155;
                        text-decoration: none;
                        font-weight: 600;
                    }
                    .nav-cta, .hero-cta, .form-submit {
                        border: none;
                        border-radius: 0.75rem;
                        background: linear-gradient(90deg, #f97316, #f59e0b);
                        color: #fff;
                        font-weight: 700;
                        cursor: pointer;
                        padding: 0.65rem 1.25rem;
                        box-shadow: 0 10px 25px rgba(249, 115, 22, 0.3);
                    }
                    .burger-menu {
                        display: none;
                        flex-direction: column;
                        gap: 4px;
                        background: none;
                        border: none;
                        cursor: pointer;
                    }
                    .burger-menu span {
                        width: 24px;
                        height: 2px;
                        background: #0f172a;
                    }
                    @media (max-width: 768px) {
                        .burger-menu {
                            display: flex;
                        }
                        .nav-right {
                            display: none;
                        }
                        .nav-right.mobile-menu-open {
                            display: flex;
                            flex-direction: column;
                            position: absolute;
                            top: 100%;
                            left: 0;
                            right: 0;
                            padding: 1rem;
                            background: #fff;
                        }
                    }
                    .hero {
                        min-height: 100vh;
                        padding: 8rem 1.5rem 5rem;
                        background: linear-gradient(135deg, #0f172a, #1e293b, #0f172a);
                        color: #fff;
                        text-align: center;
                    }
                    .hero-content {
                        max-width: 960px;
                        margin: 0 auto;
                    }
                    .hero-badge {
                        display: inline-block;
                        padding: 0.5rem 1rem;
                        border-radius: 999px;
                        border: 1px solid #fb923c;
                        color: #fdba74;
                        font-size: 0.875rem;
                        margin-bottom: 1.5rem;
                    }
                    .hero h1 {
                        font-size: clamp(2.25rem, 6vw, 4.5rem);
                        font-weight: 800;
                        line-height: 1.1;
                    }
                    .gradient {
                        background: linear-gradient(90deg, #fb923c, #fbbf24);
                        -webkit-background-clip: text;
                        -webkit-text-fill-color: transparent;
                    }
                    .hero-subtitle {
                        margin: 1.5rem auto 0;
                        max-width: 720px;
                        color: #cbd5e1;
                        font-size: 1.25rem;
                    }
                    .hero-cta-group {
                        margin-top: 2.5rem;
                        display: flex;
                        flex-wrap: wrap;
                        gap: 1rem;
                        justify-content: center;
                    }
                    .hero-cta {
                        font-size: 1.125rem;
                        padding: 1rem 2rem;
                    }
                    .hero-secondary {
                        font-size: 1.125rem;
                        padding: 1rem 2rem;
                        border-radius: 0.75rem;
                        border: 1px solid rgba(255, 255, 255, 0.2);
                        background: transparent;
                        color: #fff;
                        cursor: pointer;
                    }
                    .features, .contact {
                        padding: 6rem 1.5rem;
                        max-width: 1280px;
                        margin: 0 auto;
                        text-align: center;
                    }
                    .section-title {
                        font-size: clamp(1.875rem, 4vw, 3rem);
                        font-weight: 800;
                        color: #f97316;
                    }
                    .section-subtitle {
                        max-width: 640px;
                        margin: 1rem auto 0;
                        color: #475569;
                        font-size: 1.125rem;
                    }
                    .feature-grid {
                        margin-top: 4rem;
                        display: grid;
                        gap: 2rem;
                        grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                        text-align: left;
                    }
                    .feature-card {
                        padding: 2rem;
                        border: 1px solid #f1f5f9;
                        border-radius: 1rem;
                        box-shadow: 0 1px 2px rgba(15, 23, 42, 0.05);
                    }
                    .feature-icon {
                        display: inline-flex;
                        align-items: center;
                        justify-content: center;
                        width: 3.5rem;
                        height: 3.5rem;
                        border-radius: 1rem;
                        background: linear-gradient(135deg, #f97316, #f59e0b);
                        font-size: 1.5rem;
                        margin-bottom: 1.25rem;
                    }
                    .reveal {
                        opacity: 0;
                        transform: translateY(24px);
                        transition: opacity 0.6s ease-out, transform 0.6s ease-out;
                    }
                    .reveal.visible {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .stats {
                        padding: 4rem 1.5rem;
                        background: #0f172a;
                        color: #fff;
                    }
                    .stats-grid {
                        max-width: 1280px;
                        margin: 0 auto;
                        display: grid;
                        gap: 2rem;
                        grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
                        text-align: center;
                    }
                    .stat-value {
                        font-size: 3rem;
                        font-weight: 800;
                        color: #fb923c;
                        font-variant-numeric: tabular-nums;
                    }
                    .stat-label {
                        color: #94a3b8;
                    }
                    .contact {
                        background: linear-gradient(to bottom, #fff, #fff7ed);
                        max-width: none;
                    }
                    .contact-card {
                        max-width: 768px;
                        margin: 3rem auto 0;
                        text-align: left;
                    }
                    .form-grid {
                        display: grid;
                        gap: 1rem;
                        grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
                    }
                    .form-field {
                        display: flex;
                        flex-direction: column;
                        gap: 0.35rem;
                        margin-bottom: 1rem;
                    }
                    .form-label {
                        font-size: 0.875rem;
                        font-weight: 600;
                        color: #334155;
                    }
                    .form-input {
                        border: 1px solid #e2e8f0;
                        border-radius: 0.75rem;
                        background: #f8fafc;
                        padding: 0.75rem 1rem;
                        font-size: 0.875rem;
                        resize: none;
                    }
                    .form-input:focus {
                        outline: none;
                        border-color: #fb923c;
                        background: #fff;
                        box-shadow: 0 0 0 4px #ffedd5;
                    }
                    .form-input.invalid {
                        border-color: #ef4444;
                    }
                    .field-error {
                        color: #ef4444;
                        font-size: 0.8rem;
                    }
                    .form-submit {
                        width: 100%;
                        font-size: 1.125rem;
                        padding: 1rem 2rem;
                    }
                    .form-submit:disabled {
                        opacity: 0.6;
                        cursor: wait;
                    }
                    .form-success {
                        text-align: center;
                        padding: 2.5rem;
                        border-radius: 1rem;
                        background: #ecfdf5;
                        color: #065f46;
                    }
                    .form-note {
                        color: #475569;
                        font-size: 0.9rem;
                    }
                    .form-secondary {
                        margin-top: 1rem;
                        border: 1px solid #065f46;
                        border-radius: 0.75rem;
                        background: transparent;
                        color: #065f46;
                        padding: 0.6rem 1.2rem;
                        cursor: pointer;
                    }
                    .form-error-banner {
                        padding: 1rem 1.5rem;
                        border-radius: 0.75rem;
                        background: #fef2f2;
                        color: #b91c1c;
                    }
                    .direct-contacts {
                        margin-top: 2rem;
                        display: flex;
                        flex-wrap: wrap;
                        gap: 1.5rem;
                        justify-content: center;
                    }
                    .direct-contacts a {
                        color: #ea580c;
                        text-decoration: none;
                        font-weight: 600;
                    }
                    .footer {
                        background: #0f172a;
                        color: #94a3b8;
                        padding: 3rem 1.5rem;
                    }
                    .footer-content {
                        max-width: 1280px;
                        margin: 0 auto;
                        display: flex;
                        flex-wrap: wrap;
                        gap: 1.5rem;
                        align-items: center;
                        justify-content: space-between;
                    }
                    .footer-logo {
                        color: #fff;
                        font-weight: 800;
                        font-size: 1.125rem;
                    }
                    .footer-contacts {
                        display: flex;
                        gap: 1.5rem;
                        font-size: 0.875rem;
                    }
                    .footer-copy {
                        margin-top: 2rem;
                        padding-top: 1.5rem;
                        border-top: 1px solid #1e293b;
                        text-align: center;
                        font-size: 0.875rem;
                        color: #64748b;
                    }
                "#}
            </style>
        </div>
        </ContextProvider<RevealHost>>
    }
}
