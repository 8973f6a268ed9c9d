pub mod config;
pub mod lead;
pub mod reveal;

pub mod components {
    pub mod contact_form;
    pub mod header;
    pub mod reveal_card;
    pub mod stat_counter;
}

pub mod pages {
    pub mod landing;
}
