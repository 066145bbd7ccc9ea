use eframe::egui;
use tic_tac_toe_core::{GameState, MoveResult, Phase, PlayerSetup, ScoreStore};
use tracing::{debug, info};

pub const WINDOW_TITLE: &str = "Tic-Tac-Toe Game";

const FIRST_PLAYER_COLOR: egui::Color32 = egui::Color32::from_rgb(0xFF, 0x40, 0x81);
const SECOND_PLAYER_COLOR: egui::Color32 = egui::Color32::from_rgb(0x21, 0x96, 0xF3);
const TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(0x33, 0x33, 0x33);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    MainMenu,
    Setup,
    Board,
}

#[derive(Debug, Default)]
struct SetupForm {
    name1: String,
    symbol1: String,
    name2: String,
    symbol2: String,
}

/// What the user asked for during this frame. Applied once drawing is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Start,
    Submit,
    Move(usize),
    Resolve(bool),
    Quit,
}

pub struct GameApp<S: ScoreStore> {
    game: GameState<S>,
    screen: Screen,
    form: SetupForm,
    error_message: Option<String>,
    title: String,
    closing: bool,
}

impl<S: ScoreStore> GameApp<S> {
    pub fn new(game: GameState<S>) -> Self {
        Self {
            game,
            screen: Screen::MainMenu,
            form: SetupForm::default(),
            error_message: None,
            title: WINDOW_TITLE.to_string(),
            closing: false,
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: Action) {
        match action {
            Action::Start => self.screen = Screen::Setup,
            Action::Submit => self.submit_players(),
            Action::Move(index) => {
                if let MoveResult::GameOver(over) = self.game.make_move(index) {
                    info!("{}", over.message.replace('\n', " "));
                }
            }
            Action::Resolve(play_again) => {
                self.game.resolve_outcome(play_again);
                if self.game.phase() == &Phase::Terminated {
                    self.quit(ctx);
                }
            }
            Action::Quit => self.quit(ctx),
        }
    }

    fn submit_players(&mut self) {
        let form = &self.form;
        match PlayerSetup::parse(&form.name1, &form.symbol1, &form.name2, &form.symbol2) {
            Ok(setup) => {
                self.game.setup_players(setup);
                self.error_message = None;
                self.screen = Screen::Board;
            }
            Err(e) => {
                debug!("Setup form refused: {:?}", e.issues);
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn quit(&mut self, ctx: &egui::Context) {
        self.shutdown();
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn shutdown(&mut self) {
        if !self.closing {
            info!("Closing game, deleting scores.");
            self.game.shutdown();
            self.closing = true;
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = match (self.screen, self.game.phase()) {
            (Screen::Board, Phase::InProgress) => self.game.turn_status(),
            _ => WINDOW_TITLE.to_string(),
        };
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    fn main_menu(&self, ui: &mut egui::Ui) -> Option<Action> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Welcome to Tic-Tac-Toe game!")
                    .size(22.0)
                    .strong()
                    .color(TEXT_COLOR),
            );
            ui.add_space(20.0);

            if menu_button(ui, "Start the game", egui::Color32::from_rgb(0x4C, 0xAF, 0x50)) {
                action = Some(Action::Start);
            }
            ui.add_space(10.0);
            if menu_button(ui, "Quit the game", egui::Color32::from_rgb(0xF4, 0x43, 0x36)) {
                action = Some(Action::Quit);
            }
        });

        action
    }

    fn setup_form(&mut self, ui: &mut egui::Ui) -> Option<Action> {
        let mut action = None;

        ui.add_space(20.0);
        egui::Grid::new("player_setup")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                let fields = [
                    ("Player 1 Name:", &mut self.form.name1),
                    ("Player 1 Symbol:", &mut self.form.symbol1),
                    ("Player 2 Name:", &mut self.form.name2),
                    ("Player 2 Symbol:", &mut self.form.symbol2),
                ];
                for (label, value) in fields {
                    ui.label(egui::RichText::new(label).size(15.0).color(TEXT_COLOR));
                    ui.text_edit_singleline(value);
                    ui.end_row();
                }
            });

        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            if menu_button(ui, "Submit", egui::Color32::from_rgb(0x21, 0x96, 0xF3)) {
                action = Some(Action::Submit);
            }

            if let Some(error) = &self.error_message {
                ui.add_space(10.0);
                ui.colored_label(egui::Color32::RED, error);
            }
        });

        action
    }

    fn render_board(&self, ui: &mut egui::Ui) -> Option<Action> {
        let mut action = None;
        let in_progress = self.game.phase() == &Phase::InProgress;
        let first_symbol = self.game.players()[0].symbol;
        let button_size = 70.0;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            for row in 0..3 {
                ui.horizontal(|ui| {
                    let margin = (ui.available_width() - 3.0 * (button_size + 8.0)) / 2.0;
                    ui.add_space(margin.max(0.0));
                    for col in 0..3 {
                        let index = row * 3 + col;
                        let cell = self.game.board().cell(index);

                        let text = match cell {
                            Some(symbol) => egui::RichText::new(symbol.to_string())
                                .size(32.0)
                                .strong()
                                .color(symbol_color(symbol, first_symbol)),
                            None => egui::RichText::new(" ").size(32.0),
                        };

                        let button = ui.add_enabled(
                            in_progress && cell.is_none(),
                            egui::Button::new(text)
                                .fill(egui::Color32::WHITE)
                                .min_size(egui::vec2(button_size, button_size)),
                        );

                        if button.clicked() {
                            action = Some(Action::Move(index));
                        }
                    }
                });
            }

            ui.add_space(10.0);
            if in_progress {
                ui.label(egui::RichText::new(self.game.turn_status()).size(16.0));
            }
            ui.label(
                egui::RichText::new(self.game.scoreboard())
                    .size(15.0)
                    .color(TEXT_COLOR),
            );
        });

        action
    }

    fn game_over_prompt(&self, ctx: &egui::Context) -> Option<Action> {
        let Phase::Finished(over) = self.game.phase() else {
            return None;
        };
        let mut action = None;

        egui::Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(over.message.as_str());
                ui.add_space(8.0);
                ui.label("Do you want to play again?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Play again").clicked() {
                        action = Some(Action::Resolve(true));
                    }
                    if ui.button("Quit").clicked() {
                        action = Some(Action::Resolve(false));
                    }
                });
            });

        action
    }
}

impl<S: ScoreStore> eframe::App for GameApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown();
            return;
        }

        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            action = match self.screen {
                Screen::MainMenu => self.main_menu(ui),
                Screen::Setup => self.setup_form(ui),
                Screen::Board => self.render_board(ui),
            };
        });

        if self.screen == Screen::Board {
            if let Some(prompt_action) = self.game_over_prompt(ctx) {
                action = Some(prompt_action);
            }
        }

        if let Some(action) = action {
            debug!("Applying {:?}", action);
            self.apply(ctx, action);
        }

        self.sync_title(ctx);
    }
}

fn menu_button(ui: &mut egui::Ui, text: &str, fill: egui::Color32) -> bool {
    ui.add(
        egui::Button::new(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::WHITE),
        )
        .fill(fill)
        .min_size(egui::vec2(180.0, 36.0)),
    )
    .clicked()
}

/// Player 1's symbol is pink, anything else blue.
fn symbol_color(symbol: char, first_symbol: char) -> egui::Color32 {
    if symbol == first_symbol {
        FIRST_PLAYER_COLOR
    } else {
        SECOND_PLAYER_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tic_tac_toe_core::{ScoreRecord, ScoreStoreError};

    struct NullStore;

    impl ScoreStore for NullStore {
        fn load(&self) -> Result<ScoreRecord, ScoreStoreError> {
            Ok(ScoreRecord::new())
        }

        fn save(&self, _record: &ScoreRecord) -> Result<(), ScoreStoreError> {
            Ok(())
        }

        fn clear(&self) -> Result<(), ScoreStoreError> {
            Ok(())
        }
    }

    fn app() -> GameApp<NullStore> {
        GameApp::new(GameState::new_or_empty(NullStore))
    }

    #[test]
    fn test_symbol_colors_follow_player_order() {
        assert_eq!(symbol_color('X', 'X'), FIRST_PLAYER_COLOR);
        assert_eq!(symbol_color('O', 'X'), SECOND_PLAYER_COLOR);
    }

    #[test]
    fn test_invalid_form_shows_error_and_stays_on_setup() {
        let mut app = app();
        app.screen = Screen::Setup;
        app.form = SetupForm {
            name1: "Al1ce".into(),
            symbol1: "X".into(),
            name2: "Bob".into(),
            symbol2: "X".into(),
        };

        app.submit_players();

        assert_eq!(app.screen, Screen::Setup);
        assert!(app.error_message.is_some());
        assert_eq!(app.game.phase(), &Phase::AwaitingSetup);
    }

    #[test]
    fn test_invalid_form_mid_game_keeps_players_and_board() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.form = SetupForm {
            name1: "Alice".into(),
            symbol1: "X".into(),
            name2: "Bob".into(),
            symbol2: "O".into(),
        };
        app.apply(&ctx, Action::Submit);
        app.apply(&ctx, Action::Move(4));
        let players_before = app.game.players().clone();
        let board_before = app.game.board().clone();

        app.form = SetupForm {
            name1: "Al1ce".into(),
            symbol1: "X".into(),
            name2: "Carol".into(),
            symbol2: "X".into(),
        };
        app.apply(&ctx, Action::Submit);

        assert!(app.error_message.is_some());
        assert_eq!(app.game.players(), &players_before);
        assert_eq!(app.game.board(), &board_before);
        assert_eq!(app.game.current_player_index(), 1);
        assert_eq!(app.game.phase(), &Phase::InProgress);
    }

    #[test]
    fn test_valid_form_opens_board() {
        let mut app = app();
        app.form = SetupForm {
            name1: "Alice".into(),
            symbol1: "x".into(),
            name2: "Bob".into(),
            symbol2: "o".into(),
        };

        app.submit_players();

        assert_eq!(app.screen, Screen::Board);
        assert!(app.error_message.is_none());
        assert_eq!(app.game.turn_status(), "Alice's turn (X)");
    }

    #[test]
    fn test_moves_and_replay_through_actions() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.form = SetupForm {
            name1: "Alice".into(),
            symbol1: "X".into(),
            name2: "Bob".into(),
            symbol2: "O".into(),
        };
        app.apply(&ctx, Action::Submit);

        for index in [0, 4, 1, 3, 2] {
            app.apply(&ctx, Action::Move(index));
        }
        assert!(matches!(app.game.phase(), Phase::Finished(_)));

        app.apply(&ctx, Action::Resolve(true));
        assert_eq!(app.game.phase(), &Phase::InProgress);
        assert_eq!(app.game.scoreboard(), "Alice: 1  |  Bob: 0");
        assert!(!app.closing);
    }

    #[test]
    fn test_quit_shuts_down_once() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply(&ctx, Action::Quit);
        assert!(app.closing);
        assert_eq!(app.game.phase(), &Phase::Terminated);
    }
}
