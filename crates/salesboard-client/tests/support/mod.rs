pub mod monthly_testkit;
