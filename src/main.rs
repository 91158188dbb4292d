fn main() -> std::io::Result<()> {
    feedback_reporter_lib::run()
}
