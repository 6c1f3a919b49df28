fn main() {
  snipshare::main();
}
