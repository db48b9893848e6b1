fn main() -> Result<(), Box<dyn std::error::Error>> {
    flashcards_lib::run()
}
