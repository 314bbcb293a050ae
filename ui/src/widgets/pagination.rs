use egui::{Button, Ui};
use roster_business::users::DerivedView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Previous,
    Next,
    Go(usize),
}

/// Previous / page numbers / Next. Hidden when everything fits on one page.
pub fn pagination(ui: &mut Ui, view: &DerivedView<'_>) -> Option<PageNav> {
    if !view.show_pagination() {
        return None;
    }

    let mut nav = None;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(view.has_previous(), Button::new("Previous"))
            .clicked()
        {
            nav = Some(PageNav::Previous);
        }

        for page in 1..=view.total_pages {
            let selected = page == view.current_page;
            if ui.selectable_label(selected, page.to_string()).clicked() {
                nav = Some(PageNav::Go(page));
            }
        }

        if ui
            .add_enabled(view.has_next(), Button::new("Next"))
            .clicked()
        {
            nav = Some(PageNav::Next);
        }
    });
    nav
}
