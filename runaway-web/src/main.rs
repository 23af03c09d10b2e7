use macroquad::prelude::Conf;

fn window_conf() -> Conf {
    Conf {
        window_title: "Runaway Button".to_owned(),
        window_width: 1024,
        window_height: 720,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    runaway_web_lib::run().await;
}
