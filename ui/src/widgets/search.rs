use egui::{Response, TextEdit, Ui};
use snaily_business::i18n::COMMON;
use snaily_business::{Messages, UsersSearch};
use snaily_states::StateCtx;

pub const SEARCH_PLACEHOLDER: &str = "john doe";

/// Search box bound to [`UsersSearch`]. The state is only touched when the text changed,
/// so idle frames do not refilter the tables.
pub fn search_field(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let label = state_ctx
        .state::<Messages>()
        .t(COMMON, "search")
        .to_owned();
    let mut query = state_ctx.state::<UsersSearch>().query.clone();

    let response = ui
        .horizontal(|ui| {
            ui.label(label);
            ui.add(
                TextEdit::singleline(&mut query)
                    .hint_text(SEARCH_PLACEHOLDER)
                    .desired_width(260.0),
            )
        })
        .inner;

    if response.changed() {
        state_ctx.update::<UsersSearch>(|search| search.query = query);
    }

    response
}
