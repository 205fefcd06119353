mod ledger_service_tests;
