
// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: The board component starting, writing its view and shutting down
// - events_feed_mock: Mocking the events feed to drive full update cycles
