mod app;
mod element;
mod host;
mod listeners;
mod overlay;

fn main() {
    element::install();
}
