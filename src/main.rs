fn main() -> anyhow::Result<()> {
    chat_archive_organizer::cli::run()
}
