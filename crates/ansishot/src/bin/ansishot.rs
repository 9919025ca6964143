fn main() -> anyhow::Result<()> {
    ansishot::cli::run()
}
