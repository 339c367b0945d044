fn main() -> anyhow::Result<()> {
  trainer_schedule_lib::run()
}
